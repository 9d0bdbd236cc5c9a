//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands. Input
//! parsing goes through the same request types as the HTTP API, so both
//! surfaces validate identically.

use crate::api::{
    self, ChildJson, ClassifyRequest, ClassifyResponse, NavigationJson, ParentNavigationRequest,
    ParentStageRequest, ParentStageResponse, StageConfigJson, StageListResponse, ThemeResponse,
    TransitionRequest, TransitionResponse, UpcomingRequest,
};
use crate::config::AppConfig;
use nurtureup_core::{
    ChildAge, NavigationConfig, NurtureError, ParentStage, TransitionPredictor,
    calculate_parent_stage_at, classify_child_stage_at,
    engine::{child_stage_config, parent_navigation_stage, registry_ids},
    format_child_age_at, get_parent_navigation_config, get_stage_config, get_stage_theme,
};
use serde::Serialize;

/// Separator between a date and a stored stage in `--child` values.
const CHILD_STAGE_SEPARATOR: char = '@';

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn unknown_stage(id: &str) -> NurtureError {
    NurtureError::UnknownStage(id.to_string())
}

/// Parse a `--child` value: `DATE` or `DATE@stage`.
pub fn parse_child_arg(value: &str) -> ChildJson {
    match value.rsplit_once(CHILD_STAGE_SEPARATOR) {
        Some((date, stage)) => ChildJson {
            date_of_birth: date.trim().to_string(),
            stage: Some(stage.trim().to_string()),
        },
        None => ChildJson {
            date_of_birth: value.trim().to_string(),
            stage: None,
        },
    }
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), NurtureError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    println!("NurtureUp Stage Service Starting...");
    println!();
    println!("Configuration:");
    println!("  Address:     {}", config.bind_address());
    println!("  Buffer days: {}", config.transition.buffer_days);
    match config.server.rate_limit {
        0 => println!("  Rate limit:  disabled"),
        rps => println!("  Rate limit:  {} req/s", rps),
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /health                 - Health check");
    println!("  GET  /stages                 - Registry ids");
    println!("  GET  /stages/{{id}}            - Registry entry");
    println!("  GET  /stages/{{id}}/theme      - Theme tokens");
    println!("  GET  /stages/{{id}}/navigation - Tabs and gestures");
    println!("  POST /child/classify         - Classify a child");
    println!("  POST /child/transition       - Check a stored stage");
    println!("  POST /child/upcoming         - Next-stage notice");
    println!("  POST /parent/stage           - Parent stage of a family");
    println!("  POST /parent/navigation      - Parent navigation");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// REGISTRY COMMANDS
// =============================================================================

/// List registry ids.
pub fn cmd_stages(json_mode: bool) -> Result<(), NurtureError> {
    let ids = registry_ids();

    if json_mode {
        print_json(&StageListResponse {
            stages: ids.iter().map(|id| (*id).to_string()).collect(),
        });
        return Ok(());
    }

    println!("NurtureUp Stages");
    println!("================");
    for id in ids {
        if let Some(config) = get_stage_config(id) {
            println!("{:<16} {:<26} {}", id, config.name, config.age_range);
        }
    }
    Ok(())
}

/// Show one registry entry.
pub fn cmd_config(json_mode: bool, stage: &str) -> Result<(), NurtureError> {
    let config = get_stage_config(stage).ok_or_else(|| unknown_stage(stage))?;

    if json_mode {
        print_json(&StageConfigJson::from(config));
        return Ok(());
    }

    println!("{} ({})", config.name, stage);
    println!("{}", "=".repeat(config.name.len() + stage.len() + 3));
    println!("{}", config.description);
    println!();
    println!("Age range: {}", config.age_range);
    println!("Color:     {}", config.primary_color);
    println!("UI theme:  {}", config.ui_theme);
    println!("Features:  {}", config.features.join(", "));
    println!();
    print_navigation(&config.navigation);
    Ok(())
}

/// Show theme tokens. Unknown ids print the default theme.
pub fn cmd_theme(json_mode: bool, stage: &str) -> Result<(), NurtureError> {
    let theme = ThemeResponse::from(get_stage_theme(stage));

    if json_mode {
        print_json(&theme);
        return Ok(());
    }

    println!("Stage:         {}", theme.stage);
    println!("Primary color: {}", theme.primary_color);
    println!("UI theme:      {}", theme.ui_theme);
    Ok(())
}

/// Show tabs and gestures of a registry entry.
pub fn cmd_navigation(json_mode: bool, stage: &str) -> Result<(), NurtureError> {
    let config = get_stage_config(stage).ok_or_else(|| unknown_stage(stage))?;

    if json_mode {
        print_json(&NavigationJson::from(&config.navigation));
        return Ok(());
    }

    print_navigation(&config.navigation);
    Ok(())
}

fn print_navigation(nav: &NavigationConfig) {
    println!("Tabs:");
    for tab in nav.tabs {
        println!("  {}. {:<12} {:<14} [{}]", tab.order, tab.id, tab.label, tab.icon);
    }
    if !nav.gestures.is_empty() {
        println!("Gestures:");
        for gesture in nav.gestures {
            println!(
                "  {:<12} -> {:<16} {}",
                gesture.gesture, gesture.action, gesture.description
            );
        }
    }
}

// =============================================================================
// CHILD COMMANDS
// =============================================================================

/// Classify a child.
pub fn cmd_classify(
    json_mode: bool,
    date_of_birth: String,
    as_of: Option<String>,
) -> Result<(), NurtureError> {
    let (dob, now) = ClassifyRequest {
        date_of_birth,
        as_of,
    }
    .to_dates()?;

    let stage = classify_child_stage_at(dob, now);
    let label = format_child_age_at(dob, now);

    if json_mode {
        let age = ChildAge::between(dob, now);
        print_json(&ClassifyResponse::success(
            stage,
            label,
            age.months_hundredths(),
        ));
        return Ok(());
    }

    let config = child_stage_config(stage);
    println!("Age:          {}", label);
    println!("Stage:        {} ({})", stage, config.name);
    println!("Parent stage: {}", ParentStage::from(stage));
    match stage.next() {
        Some(next) => println!("Next stage:   {}", next),
        None => println!("Next stage:   none (final stage)"),
    }
    Ok(())
}

/// Print the age label.
pub fn cmd_age(
    json_mode: bool,
    date_of_birth: &str,
    as_of: Option<&str>,
) -> Result<(), NurtureError> {
    let dob = nurtureup_core::parse_date_of_birth(date_of_birth)?;
    let now = api::resolve_as_of(as_of)?;
    let label = format_child_age_at(dob, now);

    if json_mode {
        print_json(&serde_json::json!({
            "date_of_birth": dob.to_rfc3339(),
            "age_label": label,
            "age_days": ChildAge::between(dob, now).whole_days(),
        }));
        return Ok(());
    }

    println!("{}", label);
    Ok(())
}

/// Check a stored stage against the classifier.
pub fn cmd_transition(
    json_mode: bool,
    request: TransitionRequest,
    default_buffer: u32,
) -> Result<(), NurtureError> {
    let input = request.to_input(default_buffer)?;
    let check = TransitionPredictor::with_buffer_days(input.buffer_days).check(
        input.current_stage,
        input.date_of_birth,
        input.now,
    );

    if json_mode {
        print_json(&TransitionResponse::from(check));
        return Ok(());
    }

    println!("Stored stage:   {}", input.current_stage);
    println!("Buffer:         {} days", input.buffer_days);
    print_check(
        check.should_transition,
        check.next_stage.map(|s| s.to_string()),
        check.days_until_transition,
    );
    Ok(())
}

/// Advance notice for the next stage.
pub fn cmd_upcoming(
    json_mode: bool,
    request: UpcomingRequest,
    default_buffer: u32,
) -> Result<(), NurtureError> {
    let (dob, buffer_days, now) = request.to_input(default_buffer)?;
    let check = TransitionPredictor::with_buffer_days(buffer_days).upcoming(dob, now);

    if json_mode {
        print_json(&TransitionResponse::from(check));
        return Ok(());
    }

    println!("Current stage:  {}", classify_child_stage_at(dob, now));
    println!("Buffer:         {} days", buffer_days);
    print_check(
        check.should_transition,
        check.next_stage.map(|s| s.to_string()),
        check.days_until_transition,
    );
    Ok(())
}

fn print_check(should_transition: bool, next_stage: Option<String>, days: Option<u32>) {
    println!(
        "Transition:     {}",
        if should_transition { "yes" } else { "no" }
    );
    if let Some(next) = next_stage {
        println!("Next stage:     {}", next);
    }
    if let Some(days) = days {
        println!("Days remaining: {}", days);
    }
}

// =============================================================================
// PARENT COMMANDS
// =============================================================================

/// Parent stage of a family.
pub fn cmd_parent(
    json_mode: bool,
    children: &[String],
    as_of: Option<String>,
) -> Result<(), NurtureError> {
    let request = ParentStageRequest {
        children: children.iter().map(|c| parse_child_arg(c)).collect(),
        as_of,
    };
    let (records, now) = request.to_records()?;
    let stage = calculate_parent_stage_at(&records, now);

    if json_mode {
        print_json(&ParentStageResponse::success(stage));
        return Ok(());
    }

    println!("Children:     {}", records.len());
    println!("Parent stage: {}", stage);
    Ok(())
}

/// Parent navigation for a set of child stages.
pub fn cmd_parent_navigation(json_mode: bool, stages: Vec<String>) -> Result<(), NurtureError> {
    let stages = ParentNavigationRequest { stages }.to_stages()?;
    let nav = get_parent_navigation_config(&stages);

    if json_mode {
        print_json(&NavigationJson::from(nav));
        return Ok(());
    }

    let parent_stage = parent_navigation_stage(&stages);
    println!("Parent stage: {}", parent_stage);
    println!();
    print_navigation(nav);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_arg_without_stage() {
        let child = parse_child_arg("2023-01-15");
        assert_eq!(child.date_of_birth, "2023-01-15");
        assert!(child.stage.is_none());
    }

    #[test]
    fn child_arg_with_stage() {
        let child = parse_child_arg("2023-01-15@toddler");
        assert_eq!(child.date_of_birth, "2023-01-15");
        assert_eq!(child.stage.as_deref(), Some("toddler"));
    }

    #[test]
    fn child_arg_rfc3339_with_stage() {
        let child = parse_child_arg("2023-01-15T10:30:00Z@newborn");
        assert_eq!(child.date_of_birth, "2023-01-15T10:30:00Z");
        assert_eq!(child.stage.as_deref(), Some("newborn"));
        assert!(child.to_record().is_ok());
    }

    #[test]
    fn registry_commands_reject_unknown_ids() {
        assert!(matches!(
            cmd_config(true, "infant"),
            Err(NurtureError::UnknownStage(_))
        ));
        assert!(cmd_navigation(false, "infant").is_err());
    }

    #[test]
    fn theme_command_never_fails() {
        assert!(cmd_theme(true, "infant").is_ok());
    }

    #[test]
    fn child_commands_validate_input() {
        assert!(cmd_classify(true, "not-a-date".into(), None).is_err());
        assert!(
            cmd_transition(
                true,
                TransitionRequest {
                    current_stage: "baby".into(),
                    date_of_birth: "2023-01-15".into(),
                    buffer_days: None,
                    as_of: None,
                },
                14,
            )
            .is_err()
        );
        assert!(
            cmd_upcoming(
                true,
                UpcomingRequest {
                    date_of_birth: "2023-01-15".into(),
                    buffer_days: Some(400),
                    as_of: None,
                },
                14,
            )
            .is_err()
        );
    }

    #[test]
    fn parent_commands_accept_valid_input() {
        assert!(
            cmd_parent(
                true,
                &["2015-03-01".to_string(), "2023-01-15@toddler".to_string()],
                Some("2024-06-01".into()),
            )
            .is_ok()
        );
        assert!(cmd_parent_navigation(false, vec![]).is_ok());
        assert!(cmd_parent_navigation(true, vec!["teen".into()]).is_err());
    }
}
