use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

#[derive(Clone, Debug)]
pub struct UiConfig {
    pub app_title: String,
    pub app_subtitle: String,
    pub example_questions: Vec<String>,
    pub show_followup_questions: bool,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub upstream: UpstreamConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("CHATFRONT_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            static_dir: env::var("CHATFRONT_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            upstream: UpstreamConfig {
                base_url: env::var("CHAT_API_BASE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
                request_timeout_secs: env::var("CHAT_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
                max_concurrent_requests: env::var("CHAT_API_MAX_CONCURRENT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(4),
            },
            ui: UiConfig {
                app_title: env::var("CHATFRONT_TITLE")
                    .unwrap_or_else(|_| "Campus Chat".to_string()),
                app_subtitle: env::var("CHATFRONT_SUBTITLE")
                    .unwrap_or_else(|_| "Llama + PostgreSQL".to_string()),
                example_questions: env::var("CHATFRONT_EXAMPLE_QUESTIONS")
                    .map(|raw| parse_example_questions(&raw))
                    .unwrap_or_else(|_| default_example_questions()),
                show_followup_questions: env::var("CHATFRONT_SHOW_FOLLOWUPS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(true),
            },
        }
    }
}

fn parse_example_questions(raw: &str) -> Vec<String> {
    let questions: Vec<String> = raw
        .split('|')
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(str::to_string)
        .collect();

    if questions.is_empty() {
        default_example_questions()
    } else {
        questions
    }
}

fn default_example_questions() -> Vec<String> {
    vec![
        "How to defer my exams?".to_string(),
        "How does the academic classification work?".to_string(),
        "How do I apply for financial support?".to_string(),
    ]
}
