//! Route command handler.
//!
//! Single requests print the routing result as JSON. Batch mode prints a
//! table plus the confidence distribution.

use anyhow::Result;
use toolbridge_router::{BatchSummary, RoutingResult, SemanticRouter, TextGenerator};

use crate::error::CliError;
use crate::presentation::{print_json, print_separator, truncate_string};

/// Requests used by `route --batch` when none are given.
pub const SAMPLE_REQUESTS: &[&str] = &[
    // Planning
    "what next",
    "hey, go the agenda, man?",
    "what's the scoop our next adventure?",
    "what are we working on next?",
    "what's on the roadmap?",
    // Coding
    "write a function to calculate fibonacci",
    "create a React component",
    "build me a calculator",
    // Testing
    "test the login flow",
    "take a screenshot of the homepage",
    "validate the form submission",
    // Questions
    "what is async await?",
    "explain closures to me",
    "why use TypeScript?",
    // General
    "what time is it?",
    "calculate 5 + 3",
];

/// Execute the route command against the Gemini backend.
///
/// # Errors
///
/// Fails without `GEMINI_API_KEY`, on any backend error, or when a
/// response cannot be parsed.
pub async fn execute(requests: Vec<String>, batch: bool) -> Result<()> {
    let router = SemanticRouter::from_env()?;
    run(&router, requests, batch).await
}

async fn run<G: TextGenerator>(
    router: &SemanticRouter<G>,
    requests: Vec<String>,
    batch: bool,
) -> Result<()> {
    if batch {
        let requests = batch_requests(requests);
        println!("Routing {} requests...\n", requests.len());
        let results = router.batch_route(&requests).await?;
        print_batch(&requests, &results);
        return Ok(());
    }

    if requests.is_empty() {
        return Err(CliError::Arguments("route needs a request, or --batch".into()).into());
    }
    let result = router.route(&requests.join(" ")).await?;
    print_json(&result)
}

fn batch_requests(requests: Vec<String>) -> Vec<String> {
    if requests.is_empty() {
        SAMPLE_REQUESTS.iter().map(ToString::to_string).collect()
    } else {
        requests
    }
}

fn print_batch(requests: &[String], results: &[RoutingResult]) {
    print_separator(80);
    println!("{:<40}{:<25}Confidence", "Request", "Agent");
    print_separator(80);
    for (request, result) in requests.iter().zip(results) {
        println!(
            "{:<40}{:<25}{:.1}%",
            truncate_string(request, 40),
            result.agent.as_str(),
            result.confidence * 100.0
        );
    }
    print_separator(80);

    let summary = BatchSummary::of(results);
    let share = |n: usize| percent(n, summary.total());
    println!("\nConfidence Distribution:");
    println!("   High (>=90%): {} ({:.1}%)", summary.high, share(summary.high));
    println!("   Medium (70-89%): {} ({:.1}%)", summary.medium, share(summary.medium));
    println!("   Low (<70%): {} ({:.1}%)", summary.low, share(summary.low));
    println!("\n   Average Confidence: {:.1}%", summary.average * 100.0);
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use toolbridge_router::RouterError;

    struct FixedGenerator;

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, RouterError> {
            Ok(r#"{"agent": "helper-agent", "confidence": 0.75}"#.to_string())
        }
    }

    fn router() -> SemanticRouter<FixedGenerator> {
        SemanticRouter::new(FixedGenerator)
    }

    #[test]
    fn test_batch_falls_back_to_samples() {
        assert_eq!(batch_requests(vec![]).len(), SAMPLE_REQUESTS.len());
        assert_eq!(batch_requests(vec!["one".into()]), vec!["one".to_string()]);
    }

    #[test]
    fn test_percent_handles_empty_batch() {
        assert!(percent(3, 0).abs() < f64::EPSILON);
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_single_route_requires_request() {
        let err = run(&router(), vec![], false).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Arguments(_))));
    }

    #[tokio::test]
    async fn test_run_succeeds_with_parseable_responses() {
        run(&router(), vec![], true).await.unwrap();
        run(&router(), vec!["what next".into()], false).await.unwrap();
    }
}
