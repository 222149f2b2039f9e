//! Then steps for session validation BDD scenarios.

use super::world::SessionWorld;
use rstest_bdd_macros::then;
use sessioncheck::message::domain::IssueCode;

fn parse_code(code: &str) -> Result<IssueCode, eyre::Report> {
    IssueCode::ALL
        .into_iter()
        .find(|candidate| candidate.as_str() == code)
        .ok_or_else(|| eyre::eyre!("unknown issue code {code}"))
}

#[then("the session is valid")]
fn session_is_valid(world: &SessionWorld) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.valid {
        return Err(eyre::eyre!("expected a valid session, got {:?}", report.errors));
    }
    Ok(())
}

#[then("the session is invalid")]
fn session_is_invalid(world: &SessionWorld) -> Result<(), eyre::Report> {
    if world.report()?.valid {
        return Err(eyre::eyre!("expected the session to be rejected"));
    }
    Ok(())
}

#[then("the report counts {messages:usize} messages with {valid:usize} valid")]
fn report_counts(world: &SessionWorld, messages: usize, valid: usize) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if (report.message_count, report.valid_count) != (messages, valid) {
        return Err(eyre::eyre!(
            "expected {messages}/{valid} messages, got {}/{}",
            report.message_count,
            report.valid_count
        ));
    }
    Ok(())
}

#[then("no tool chain issues are reported")]
fn no_tool_chain_issues(world: &SessionWorld) -> Result<(), eyre::Report> {
    let issues = &world.report()?.tool_chain_issues;
    if !issues.is_empty() {
        return Err(eyre::eyre!("unexpected tool chain issues: {issues:?}"));
    }
    Ok(())
}

#[then(r#"exactly {count:usize} "{code}" error is reported"#)]
fn exact_error_count(world: &SessionWorld, count: usize, code: String) -> Result<(), eyre::Report> {
    let expected = parse_code(&code)?;
    let found = world
        .report()?
        .errors
        .iter()
        .filter(|issue| issue.code == expected)
        .count();
    if found != count {
        return Err(eyre::eyre!("expected {count} {code} errors, found {found}"));
    }
    Ok(())
}

#[then(r#"a "{code}" warning is reported"#)]
fn warning_reported(world: &SessionWorld, code: String) -> Result<(), eyre::Report> {
    let expected = parse_code(&code)?;
    let report = world.report()?;
    if !report.warnings.iter().any(|issue| issue.code == expected) {
        return Err(eyre::eyre!(
            "expected a {code} warning, got {:?}",
            report.warnings
        ));
    }
    Ok(())
}

#[then(r#"the duplicate uuid error cites indices "{indices}""#)]
fn duplicate_uuid_indices(world: &SessionWorld, indices: String) -> Result<(), eyre::Report> {
    let issue = world
        .report()?
        .issues_with_code(IssueCode::DuplicateUuid)
        .next()
        .ok_or_else(|| eyre::eyre!("missing DUPLICATE_UUID error"))?;
    if !issue.message.ends_with(&format!("(indices: {indices})")) {
        return Err(eyre::eyre!("unexpected message: {}", issue.message));
    }
    Ok(())
}

#[then("the session identifier is empty")]
fn session_identifier_is_empty(world: &SessionWorld) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if !report.session_id.is_empty() || !report.provider.is_empty() {
        return Err(eyre::eyre!(
            "expected empty identity, got {}/{}",
            report.session_id,
            report.provider
        ));
    }
    Ok(())
}
