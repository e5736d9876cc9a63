//! Terminal rendering for flow results.

use colored::Colorize;
use setu_core::audit::AuditEntry;
use setu_core::condition::FhirRecord;
use setu_core::diagnosis::{DiagnosisSuggestion, MAX_POLL_ATTEMPTS};
use setu_core::terminology::{CodedConcept, ConceptPair, Suggestion};

pub fn banner(base_url: &str) {
    println!("{}", "=== Setu: NAMASTE ↔ ICD-11 coder ===".bright_magenta().bold());
    println!("{}", format!("Service: {base_url}").bright_black());
    println!(
        "{}",
        "Type a term to search, or /help for the command list.".bright_black()
    );
    println!();
}

pub fn help(authenticated: bool) {
    println!("{}", "Commands:".bold());
    if authenticated {
        println!("  <text>            search a traditional-medicine term");
        println!("  /select <n>       pick suggestion n and translate it");
        println!("  /ai <symptoms>    ask the AI assistant for diagnoses");
        println!("  /pick <n>         adopt AI diagnosis n");
        println!("  /reset-ai         discard the current AI analysis");
        println!("  /generate         build the FHIR Condition record");
        println!("  /copy             print the record as indented JSON");
        println!("  /download         write fhir_condition.json here");
        println!("  /upload <path>    upload a local FHIR bundle");
        println!("  /logs             show recent audit entries");
        println!("  /show             show the current selection state");
        println!("  /logout           end the session");
    } else {
        println!("  /login [user] [password]   log in to the service");
        println!("  /register                  create a clinician account");
    }
    println!("  /help             this list");
    println!("  /quit             exit");
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn notice(message: &str) {
    println!("{}", message.bright_black());
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn suggestions(list: &[Suggestion]) {
    if list.is_empty() {
        println!("{}", "No suggestions.".bright_black());
        return;
    }
    for (index, suggestion) in list.iter().enumerate() {
        println!(
            "  {} {} ({}) - {}",
            format!("{}.", index + 1).bright_black(),
            suggestion.traditional_term.bold(),
            suggestion.system,
            suggestion.biomedical_term.italic()
        );
    }
    println!("{}", "Use /select <n> to translate one.".bright_black());
}

pub fn translation(selected: Option<&CodedConcept>, pair: &ConceptPair) {
    println!("{}", "Code Translation Results".bold());
    if let Some(selected) = selected {
        println!("  {}", "NAMASTE Code (India)".bright_blue());
        println!("    {}  {}", selected.code.on_bright_white().black(), selected.display.bold());
    }
    println!("  {}", "ICD-11 and TM2 Codes (International)".bright_blue());
    println!(
        "    {} {}  {}",
        "Traditional Medicine (TM2):".bright_black(),
        pair.tm.code,
        pair.tm.display
    );
    println!(
        "    {} {}  {}",
        "ICD-11 Biomedical Equivalent:".bright_black(),
        pair.biomed.code,
        pair.biomed.display
    );
}

pub fn diagnoses(list: &[DiagnosisSuggestion]) {
    if list.is_empty() {
        println!("{}", "The AI returned no suggestions.".yellow());
        return;
    }
    println!("{}", "AI Suggestions".bold());
    for (index, suggestion) in list.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", index + 1).bright_black(),
            suggestion.diagnosis.bold(),
            format!("(NAMASTE: {})", suggestion.namaste_code).bright_black()
        );
        if !suggestion.reasoning.is_empty() {
            println!("     Reasoning: {}", suggestion.reasoning);
        }
        if !suggestion.tm2_mapping.is_empty() || !suggestion.biomed_mapping.is_empty() {
            println!(
                "     TM2: {}   Biomed: {}",
                suggestion.tm2_mapping, suggestion.biomed_mapping
            );
        }
    }
    println!(
        "{}",
        "Use /pick <n> to adopt one, or /reset-ai to start over.".bright_black()
    );
}

pub fn job_status(status: &str, attempt: u32) {
    println!(
        "{}",
        format!("Job status: {status} (check {attempt}/{MAX_POLL_ATTEMPTS})").bright_black()
    );
}

pub fn record(record: &FhirRecord) {
    println!("{}", "FHIR R4 Standardized Output".bold());
    println!("{}", "Compliance features:".bright_black());
    for line in [
        "FHIR R4 Compliant Structure",
        "Dual Coding (NAMASTE + ICD-11)",
        "Patient Consent Tracking",
        "ABHA Integration Ready",
        "Audit Trail Metadata",
    ] {
        println!("{}", format!("  - {line}").bright_black());
    }
    match record.to_pretty_json() {
        Ok(text) => println!("{}", text.bright_blue()),
        Err(err) => error(&format!("Could not render the record: {err}")),
    }
}

pub fn audit_logs(entries: &[AuditEntry]) {
    if entries.is_empty() {
        println!("{}", "No logs found.".bright_black());
        return;
    }
    println!(
        "{:<10} {:<20} {:<12} {:<24} {}",
        "ID".bold(),
        "Created At".bold(),
        "Actor".bold(),
        "Action".bold(),
        "Resource".bold()
    );
    for entry in entries {
        let id: String = entry.id.chars().take(8).collect();
        println!(
            "{:<10} {:<20} {:<12} {:<24} {}",
            id,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.actor,
            entry.action,
            entry.resource.as_deref().unwrap_or("-")
        );
        if let Some(details) = &entry.details {
            println!("{}", format!("           {details}").bright_black());
        }
    }
}
