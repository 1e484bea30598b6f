//! Prompt construction and response parsing.

use crate::agent::{AgentType, RoutingResult};
use crate::error::RouterError;
use serde_json::Value;
use std::fmt::Write;

/// Role, trigger words and example requests for each agent.
const AGENT_GUIDE: [(AgentType, &str, &str, &str); 5] = [
    (
        AgentType::NextStepsPlanner,
        "Plans implementation, creates roadmaps, answers \"what's next\" questions",
        "plan, roadmap, next steps, what next, agenda, upcoming work",
        "\"what next\", \"what's on the agenda?\"",
    ),
    (
        AgentType::Test,
        "Browser automation, testing, screenshots, validation",
        "test, browser, e2e, screenshot, validate, check, puppeteer",
        "\"test the login flow\", \"take a screenshot\"",
    ),
    (
        AgentType::Coder,
        "Writes code, implements features, creates functions",
        "write, code, function, create, build, implement",
        "\"write a function\", \"build a calculator\"",
    ),
    (
        AgentType::Helper,
        "Answers questions, explains concepts",
        "what is, why, how does, explain, difference",
        "\"what is async\", \"explain closures\"",
    ),
    (
        AgentType::GeneralPurpose,
        "General tasks and simple tools (time, calculator)",
        "calculate, what time, current time, math",
        "\"what time is it\", \"calculate 5 + 3\"",
    ),
];

/// Build the routing prompt for one request.
pub fn build_prompt(request: &str) -> String {
    let mut prompt = String::from(
        "You are a semantic router for a multi-agent system. Decide which specialist agent should handle the user request.\n\nAvailable agents:\n\n",
    );

    for (index, (agent, role, triggers, examples)) in AGENT_GUIDE.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {agent} - {role}", index + 1);
        let _ = writeln!(prompt, "   Triggers: {triggers}");
        let _ = writeln!(prompt, "   Examples: {examples}\n");
    }

    let _ = write!(
        prompt,
        "User request: {request:?}\n\n\
         Respond with ONLY a JSON object in this exact format:\n\
         {{\n  \"agent\": \"<agent_name>\",\n  \"confidence\": <0.0-1.0>,\n  \"reasoning\": \"<brief explanation>\"\n}}\n\n\
         Rules:\n\
         - Choose the most specific agent that matches the intent\n\
         - Confidence reflects how certain you are (0.0 = unsure, 1.0 = certain)\n\
         - Planning, roadmap, agenda and next-steps requests go to next_steps_planner\n\
         - Read informal language generously\n\
         - No text outside the JSON object"
    );
    prompt
}

/// Parse model output into a routing result.
///
/// Markdown code fences around the JSON are tolerated. The agent must be
/// one of the known agents and the confidence a number in `[0, 1]`.
pub fn parse_response(text: &str) -> Result<RoutingResult, RouterError> {
    let cleaned = strip_code_fences(text);

    let parsed: Value = serde_json::from_str(cleaned)
        .map_err(|e| RouterError::parse(format!("invalid JSON: {e}"), text))?;

    let agent = parsed
        .get("agent")
        .and_then(Value::as_str)
        .filter(|agent| !agent.is_empty())
        .ok_or_else(|| RouterError::parse("missing agent", text))?;
    let agent: AgentType = agent
        .parse()
        .map_err(|e: String| RouterError::parse(e, text))?;

    let confidence = parsed
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| RouterError::parse("confidence is not a number", text))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(RouterError::parse(
            format!("confidence {confidence} outside [0, 1]"),
            text,
        ));
    }

    let reasoning = parsed
        .get("reasoning")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(RoutingResult {
        agent,
        confidence,
        reasoning,
    })
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
