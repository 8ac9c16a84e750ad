// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// echeque — Electronic check issuance and verification
//
// Entry point. Initialises logging, opens the on-disk ledger, and runs one
// command.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use echeque_core::error::Result;
use echeque_core::human_errors::{HumanError, humanize_error};
use echeque_core::{AppConfig, Bank, CheckRecord, VerificationPolicy, timestamp};
use echeque_document::{QrModuleEncoder, RasterRenderer, payload, render_payload, save_png};
use echeque_ledger::{CheckDraft, VerificationOutcome};

use services::app_services::AppServices;

#[derive(Debug, Parser)]
#[command(name = "echeque", version, about = "Issue and verify electronic checks")]
struct Cli {
    /// Directory holding the ledger database and config.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue and sign a new check.
    Issue(IssueArgs),
    /// Verify a check number against its security PIN.
    Verify {
        #[arg(long)]
        number: String,
        #[arg(long)]
        pin: String,
        /// Also write the check's scan code to this PNG file.
        #[arg(long, value_name = "FILE.png")]
        qr: Option<PathBuf>,
    },
    /// List issued checks, newest first, with totals.
    History,
    /// Read scanned verification payload text.
    Decode {
        /// Payload JSON as read from the scan code.
        payload: String,
    },
    /// Show or change settings.
    Config(ConfigArgs),
    /// List the banks a check can be drawn on.
    Banks,
}

#[derive(Debug, Args)]
struct IssueArgs {
    #[arg(long)]
    number: String,
    #[arg(long)]
    issuer: String,
    #[arg(long)]
    account: String,
    #[arg(long)]
    beneficiary: String,
    /// Amount in figures, e.g. 1500 or 99.50.
    #[arg(long)]
    amount: String,
    /// Issue date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Official Arabic bank name (see `echeque banks`).
    #[arg(long)]
    bank: String,
    #[arg(long, default_value = "")]
    branch: String,
    /// Four-digit security PIN shared with the holder.
    #[arg(long)]
    pin: String,
    /// Also write the check's scan code to this PNG file.
    #[arg(long, value_name = "FILE.png")]
    qr: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    #[arg(long)]
    jurisdiction: Option<String>,
    #[arg(long)]
    scan_code_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    PinOnly,
    RecomputeSignature,
}

impl From<PolicyArg> for VerificationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PinOnly => VerificationPolicy::PinOnly,
            PolicyArg::RecomputeSignature => VerificationPolicy::RecomputeSignature,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            print_human(&humanize_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut app = AppServices::init(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Issue(args) => {
            let draft = CheckDraft {
                check_number: args.number,
                issuer_name: args.issuer,
                issuer_account: args.account,
                beneficiary_name: args.beneficiary,
                amount: args.amount,
                issue_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                bank_name: args.bank,
                branch_name: args.branch,
                security_pin: args.pin,
            };
            let issuance = app.checks_mut().issue(&draft)?;
            print_record(&issuance.record);
            println!();
            println!("scan code payload:");
            println!("{}", issuance.payload);
            if let Some(path) = &args.qr {
                write_scan_code(app.config(), &issuance.payload, path)?;
                println!("scan code written to {}", path.display());
            }
        }

        Command::Verify { number, pin, qr } => {
            let verification = app.checks().verify(&number, &pin)?;
            match &verification.outcome {
                VerificationOutcome::Valid(verified) => {
                    println!("VALID: verified at {}", timestamp::format(&verified.verified_at));
                    println!();
                    print_record(&verified.record);
                    if let Some(payload) = &verification.payload {
                        println!();
                        println!("scan code payload:");
                        println!("{payload}");
                        if let Some(path) = &qr {
                            write_scan_code(app.config(), payload, path)?;
                            println!("scan code written to {}", path.display());
                        }
                    }
                }
                outcome => {
                    if let Some(human) = outcome.human_message() {
                        print_human(&human);
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Command::History => {
            let checks = app.checks();
            for record in checks.history() {
                println!(
                    "{:<12} {}  {:>16}  {}  {}",
                    record.check_number.as_str(),
                    record.issue_date,
                    record.amount.to_string(),
                    record.beneficiary_name,
                    record.bank_name.name(),
                );
            }
            let summary = checks.summary();
            println!();
            println!(
                "{} checks, {} active, total {} {}",
                summary.total_checks,
                summary.active_checks,
                summary.total_amount,
                checks.config().currency_suffix,
            );
        }

        Command::Decode { payload: raw } => {
            let decoded = payload::decode(&raw)?;
            println!("check number: {}", decoded.check_number);
            println!("signature:    {}", decoded.signature);
            println!("issued at:    {}", timestamp::format(&decoded.issued_at));
            println!("country:      {}", decoded.jurisdiction);
            let known = app
                .checks()
                .lookup(decoded.check_number.as_str())
                .is_some_and(|record| decoded.describes(record));
            println!("in ledger:    {}", if known { "yes" } else { "no" });
        }

        Command::Config(args) => {
            let mut config = app.config().clone();
            let changed = args.policy.is_some()
                || args.jurisdiction.is_some()
                || args.scan_code_size.is_some();
            if let Some(policy) = args.policy {
                config.verification_policy = policy.into();
            }
            if let Some(jurisdiction) = args.jurisdiction {
                config.jurisdiction = jurisdiction;
            }
            if let Some(size) = args.scan_code_size {
                config.scan_code_size_px = size;
            }
            if changed {
                app.save_config(&config)?;
                tracing::info!(path = %app.data_dir().display(), "config saved");
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Command::Banks => {
            for bank in Bank::ALL {
                println!("{}", bank.name());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Render `payload` at the configured size and save it as PNG.
fn write_scan_code(config: &AppConfig, payload: &str, path: &Path) -> Result<()> {
    let renderer = RasterRenderer::new(QrModuleEncoder);
    let image = render_payload(&renderer, payload, config.scan_code_size_px)?;
    save_png(&image, path)
}

fn print_record(record: &CheckRecord) {
    println!("check number:  {}", record.check_number);
    println!("issuer:        {} ({})", record.issuer_name, record.issuer_account);
    println!("beneficiary:   {}", record.beneficiary_name);
    println!("amount:        {}", record.amount);
    println!("in words:      {}", record.amount_in_words);
    println!("issue date:    {}", record.issue_date);
    println!("bank:          {}", record.bank_name.name());
    if let Some(branch) = &record.branch_name {
        println!("branch:        {branch}");
    }
    println!("issued at:     {}", timestamp::format(&record.issued_at));
    println!("signature:     {}", record.signature);
}

fn print_human(human: &HumanError) {
    if let Some(ar) = &human.message_ar {
        eprintln!("{ar}");
    }
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}
