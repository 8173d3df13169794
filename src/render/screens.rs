use std::fmt::Write;

use crate::controller::Phase;
use crate::models::domain::{Difficulty, Theme};
use crate::render::escape::escape_html;
use crate::session::{AnswerRecord, SessionState};

/// Project the current phase onto exactly one of the five screens. Pure
/// function of its inputs; `data-action` attributes are the host's wiring
/// points and the `fade-in` class is its hook for the screen transition.
pub fn render(phase: &Phase, theme: Theme, selected_difficulty: Difficulty) -> String {
    let screen = match phase {
        Phase::Idle => start_screen(selected_difficulty),
        Phase::Loading { topic, .. } => loading_screen(topic),
        Phase::InProgress(session) => quiz_screen(session),
        Phase::Finished(session) => end_screen(session),
        Phase::Error { message } => error_screen(message),
    };

    format!(
        "<div class=\"app\" data-theme=\"{}\">\n{}</div>\n",
        theme.as_str(),
        screen
    )
}

fn start_screen(selected_difficulty: Difficulty) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"screen screen--start fade-in\">\n");
    html.push_str("<h1>AI Topic Quiz</h1>\n");
    html.push_str(
        "<input class=\"topic-input\" type=\"text\" placeholder=\"Enter any topic...\" />\n",
    );
    html.push_str("<div class=\"difficulty-picker\" role=\"radiogroup\">\n");
    for difficulty in Difficulty::ALL {
        let active = if difficulty == selected_difficulty {
            " difficulty--active"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<button class=\"difficulty{}\" data-action=\"select-difficulty\" data-difficulty=\"{}\">{}</button>",
            active,
            difficulty.as_str(),
            difficulty.as_str()
        );
    }
    html.push_str("</div>\n");
    html.push_str("<button class=\"primary\" data-action=\"start\">Start Quiz</button>\n");
    html.push_str(theme_toggle());
    html.push_str("</section>\n");
    html
}

fn loading_screen(topic: &str) -> String {
    format!(
        "<section class=\"screen screen--loading fade-in\">\n\
         <div class=\"spinner\"></div>\n\
         <p>Generating your quiz about {}...</p>\n\
         </section>\n",
        escape_html(topic)
    )
}

fn quiz_screen(session: &SessionState) -> String {
    let question = session.current_question();
    let answer = session.current_answer();

    let mut html = String::new();
    html.push_str("<section class=\"screen screen--quiz fade-in\">\n");
    let _ = writeln!(
        html,
        "<header><span class=\"progress\">Question {} of {}</span>\
         <span class=\"timer\" data-remaining=\"{}\">{}s</span></header>",
        session.current_index + 1,
        session.questions.len(),
        session.timer.remaining_seconds(),
        session.timer.remaining_seconds()
    );
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&question.question));

    html.push_str("<div class=\"options\">\n");
    for option in &question.options {
        let class = option_class(option, &question.correct_answer, answer);
        let _ = writeln!(
            html,
            "<button class=\"{}\" data-action=\"answer\" data-option=\"{}\"{}>{}</button>",
            class,
            escape_html(option),
            if answer.is_answered() { " disabled" } else { "" },
            escape_html(option)
        );
    }
    html.push_str("</div>\n");

    if matches!(answer, AnswerRecord::TimedOut) {
        html.push_str("<p class=\"timeout-notice\">Time's up!</p>\n");
    }
    if answer.is_answered() {
        let _ = writeln!(
            html,
            "<div class=\"explanation\"><strong>{}</strong> {}</div>",
            escape_html(&question.correct_answer),
            escape_html(&question.explanation)
        );
    }

    let _ = writeln!(
        html,
        "<nav><button data-action=\"back\"{}>Previous</button>\
         <button data-action=\"next\"{}>{}</button></nav>",
        if session.current_index == 0 {
            " disabled"
        } else {
            ""
        },
        if answer.is_answered() { "" } else { " disabled" },
        if session.is_last_question() {
            "Finish"
        } else {
            "Next"
        }
    );
    html.push_str("</section>\n");
    html
}

/// Option styling is a deterministic function of the recorded answer and the
/// canonical correct-answer string.
fn option_class(option: &str, correct_answer: &str, answer: &AnswerRecord) -> &'static str {
    match answer {
        AnswerRecord::Unanswered => "option",
        AnswerRecord::Selected(choice) => {
            if option == correct_answer {
                "option option--correct"
            } else if option == choice {
                "option option--incorrect"
            } else {
                "option option--disabled"
            }
        }
        AnswerRecord::TimedOut => {
            if option == correct_answer {
                "option option--correct"
            } else {
                "option option--disabled"
            }
        }
    }
}

fn end_screen(session: &SessionState) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"screen screen--end fade-in\">\n");
    html.push_str("<h1>Quiz Complete!</h1>\n");
    // The host animates the counter from 0; the target is the exact score.
    let _ = writeln!(
        html,
        "<p class=\"score\" data-final-score=\"{}\">{} / {}</p>",
        session.score,
        session.score,
        session.questions.len()
    );
    let _ = writeln!(
        html,
        "<p>Topic: {} ({})</p>",
        escape_html(&session.topic),
        session.difficulty.as_str()
    );

    if !session.resources.is_empty() {
        html.push_str("<h2>Keep learning</h2>\n<ul class=\"resources\">\n");
        for resource in &session.resources {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a> {}</li>",
                escape_html(&resource.link),
                escape_html(&resource.title),
                escape_html(&resource.description)
            );
        }
        html.push_str("</ul>\n");
    }

    if !session.citations.is_empty() {
        html.push_str("<h2>Sources</h2>\n<ul class=\"sources\">\n");
        for citation in &session.citations {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&citation.uri),
                escape_html(&citation.title)
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<button class=\"primary\" data-action=\"restart\">Try Another Topic</button>\n");
    html.push_str(theme_toggle());
    html.push_str("</section>\n");
    html
}

fn error_screen(message: &str) -> String {
    format!(
        "<section class=\"screen screen--error fade-in\">\n\
         <h1>Oops!</h1>\n\
         <p class=\"error-message\">{}</p>\n\
         <button class=\"primary\" data-action=\"restart\">Try Again</button>\n\
         </section>\n",
        escape_html(message)
    )
}

fn theme_toggle() -> &'static str {
    "<button class=\"theme-toggle\" data-action=\"toggle-theme\">Toggle theme</button>\n"
}
