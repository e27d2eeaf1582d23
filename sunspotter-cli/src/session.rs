//! The interactive search screen: prompt for a zip code, fetch, render,
//! repeat. One search is in flight at a time; the loop awaits each fetch
//! before accepting the next query, so a newer search can never race an
//! older one onto the screen.

use std::fmt::Write as _;

use anyhow::Result;
use inquire::Text;
use sunspotter_core::{Config, Error, ForecastReport, ForecastSource, fetcher_from_config, parse_forecast};

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let fetcher = fetcher_from_config(&config)?;
    let mut screen = Screen::new(Box::new(fetcher));

    println!("Enter a zip code to check for sunshine.");
    println!("Press Enter alone to repeat the last search, `q` to quit.");

    loop {
        let input = Text::new("zip:").prompt()?;
        match screen.submit(input.trim()).await {
            Outcome::Quit => break,
            Outcome::Rendered(text) => print!("{text}"),
            Outcome::Notice(message) => println!("{message}"),
        }
    }

    Ok(())
}

/// What one submitted line of input produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    /// A fresh report, fully rendered.
    Rendered(String),
    /// A message that leaves whatever was rendered before untouched.
    Notice(String),
}

/// State of the single search screen.
pub struct Screen {
    source: Box<dyn ForecastSource>,
    /// Most recent query, kept only for this session. Never written to disk.
    last_query: Option<String>,
}

impl Screen {
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self { source, last_query: None }
    }

    /// Handle one line of input. Empty input repeats the last search.
    pub async fn submit(&mut self, input: &str) -> Outcome {
        if input == "q" || input == "quit" {
            return Outcome::Quit;
        }

        let query = if input.is_empty() {
            match &self.last_query {
                Some(last) => last.clone(),
                None => return Outcome::Notice("Please enter a zip code".to_string()),
            }
        } else {
            input.to_string()
        };

        self.last_query = Some(query.clone());
        tracing::debug!(%query, "search submitted");

        match self.search(&query).await {
            Ok(report) => Outcome::Rendered(render(&report)),
            Err(err) => Outcome::Notice(describe_error(&err)),
        }
    }

    async fn search(&self, query: &str) -> Result<ForecastReport, Error> {
        let raw = self.source.fetch(query).await?;
        parse_forecast(&raw)
    }
}

fn describe_error(err: &Error) -> String {
    match err {
        Error::Fetch { status: Some(code), .. } => {
            format!("{code}: check the zip code and try again")
        }
        Error::Fetch { status: None, .. } => {
            "Network error: could not reach the forecast service".to_string()
        }
        Error::Parse { .. } => {
            "The forecast service sent something unreadable; nothing was updated".to_string()
        }
    }
}

/// Render a report: the announcement first, then one row per forecast entry
/// in upstream order.
pub fn render(report: &ForecastReport) -> String {
    let mut out = String::new();

    if report.verdict.is_sunny {
        out.push_str("There will be sun!\n");
        if let Some(time) = &report.verdict.first_sunny_at {
            let _ = writeln!(out, "At {time}");
        }
    } else {
        out.push_str("No sun in this forecast. Better luck next time.\n");
    }
    out.push('\n');

    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{:<12} {:<14} {:>10}  [{}]",
            entry.observed_at, entry.condition, entry.temperature_label, entry.icon_key
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use sunspotter_core::{ForecastEntry, SunnyVerdict};

    /// Canned forecast source that records every query it sees.
    #[derive(Debug)]
    struct StubSource {
        reply: Reply,
        queries: Arc<Mutex<Vec<String>>>,
    }

    #[derive(Debug)]
    enum Reply {
        Body(&'static str),
        Http(u16),
    }

    #[async_trait::async_trait]
    impl ForecastSource for StubSource {
        async fn fetch(&self, query: &str) -> Result<String, Error> {
            self.queries.lock().unwrap().push(query.to_string());
            match &self.reply {
                Reply::Body(body) => Ok((*body).to_string()),
                Reply::Http(code) => Err(Error::Fetch { status: Some(*code), source: None }),
            }
        }
    }

    const CLEAR_DOC: &str = r#"{"list": [
        {"weather": [{"main": "Clear", "icon": "01d"}], "main": {"temp": 70}, "dt": 1000003600}
    ]}"#;

    /// Screen driven by a stub, plus a handle on the stub's call log.
    fn screen_with(reply: Reply) -> (Screen, Arc<Mutex<Vec<String>>>) {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let stub = StubSource { reply, queries: Arc::clone(&queries) };
        (Screen::new(Box::new(stub)), queries)
    }

    #[tokio::test]
    async fn q_quits() {
        let (mut screen, queries) = screen_with(Reply::Http(500));

        assert_eq!(screen.submit("q").await, Outcome::Quit);
        assert!(queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_input_without_history_does_not_fetch() {
        let (mut screen, queries) = screen_with(Reply::Body(CLEAR_DOC));

        let outcome = screen.submit("").await;

        assert_eq!(outcome, Outcome::Notice("Please enter a zip code".to_string()));
        assert!(queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_input_repeats_the_last_query() {
        let (mut screen, queries) = screen_with(Reply::Body(CLEAR_DOC));

        let first = screen.submit("98105").await;
        assert!(matches!(first, Outcome::Rendered(_)));

        let repeated = screen.submit("").await;
        assert!(matches!(repeated, Outcome::Rendered(_)));

        assert_eq!(*queries.lock().unwrap(), ["98105", "98105"]);
    }

    #[tokio::test]
    async fn fetch_failure_is_a_notice_with_the_status() {
        let (mut screen, _) = screen_with(Reply::Http(404));

        let outcome = screen.submit("00000").await;

        match outcome {
            Outcome::Notice(message) => assert!(message.starts_with("404:")),
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_body_is_a_generic_notice() {
        let (mut screen, _) = screen_with(Reply::Body("{\"cod\":\"200\"}"));

        let outcome = screen.submit("98105").await;

        match outcome {
            Outcome::Notice(message) => assert!(message.contains("nothing was updated")),
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[test]
    fn render_announces_sun_with_its_time() {
        let report = ForecastReport {
            entries: vec![ForecastEntry {
                condition: "Clear".to_string(),
                observed_at: "Sun, 2:46 AM".to_string(),
                temperature_label: "(70°F)".to_string(),
                icon_key: "icon01d".to_string(),
            }],
            verdict: SunnyVerdict {
                is_sunny: true,
                first_sunny_at: Some("Sun, 2:46 AM".to_string()),
            },
        };

        let text = render(&report);

        assert!(text.starts_with("There will be sun!\nAt Sun, 2:46 AM\n"));
        assert!(text.contains("icon01d"));
        assert!(text.contains("(70°F)"));
    }

    #[test]
    fn render_announces_no_sun_without_a_time() {
        let report = ForecastReport {
            entries: Vec::new(),
            verdict: SunnyVerdict::default(),
        };

        let text = render(&report);

        assert!(text.starts_with("No sun in this forecast."));
        assert!(!text.contains("At "));
    }
}
