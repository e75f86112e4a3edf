use clap::Parser;
use compliance_monitor::api;
use compliance_monitor::config::cli::AnalyzeArgs;
use compliance_monitor::core::catalog::regulation_catalog;
use compliance_monitor::core::scoring::risk_from_score;
use compliance_monitor::domain::model::CompanyData;
use compliance_monitor::utils::error::ErrorSeverity;
use compliance_monitor::utils::format::format_currency;
use compliance_monitor::utils::{logger, validation::Validate};
use compliance_monitor::{Cli, Command, ComplianceError, ComplianceMonitor, Result, Settings};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match cli.options.settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    logger::init_logger(&settings.logging.format, &settings.logging.level, cli.options.verbose);
    tracing::info!("Starting compliance-monitor {}", env!("CARGO_PKG_VERSION"));
    if cli.options.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    let outcome = match cli.command {
        Command::Serve => api::serve(&settings).await,
        Command::Dashboard => api::dashboard::serve(&settings).await,
        Command::Analyze(args) => analyze(&settings, args).await,
        Command::Regulations => print_regulations(),
        Command::CheckConfig => {
            check_config(&settings);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }
}

async fn analyze(settings: &Settings, args: AnalyzeArgs) -> Result<()> {
    let raw = tokio::fs::read(&args.input).await.map_err(|e| {
        tracing::error!("Cannot read {}: {}", args.input.display(), e);
        ComplianceError::IoError(e)
    })?;
    let company: CompanyData = serde_json::from_slice(&raw).map_err(|e| {
        tracing::error!("Invalid company data in {}: {}", args.input.display(), e);
        ComplianceError::SerializationError(e)
    })?;

    let model = settings.generative_model()?;
    let monitor = ComplianceMonitor::with_model(model, Some(PathBuf::from(&settings.storage.regulations_dir)));
    let result = monitor.analyze_compliance(&company, &args.regulations).await;

    println!("✅ Analysis for {} ({})", company.company_name, result.regulations.join(", "));
    println!(
        "   Score: {}/100 ({} band)",
        result.compliance_score,
        risk_from_score(result.compliance_score)
    );
    println!("   Risk: {}", result.risk_level.as_str().to_uppercase());
    println!("   Estimated fine: {}", format_currency(result.estimated_fine));
    println!(
        "   Violations: {}, suggested fixes: {}",
        result.violations.len(),
        result.suggested_fixes.len()
    );

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &result.audit_report).await?;
            println!("📁 Report saved to: {}", path.display());
        }
        None => println!("\n{}", result.audit_report),
    }

    Ok(())
}

fn print_regulations() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&regulation_catalog())?);
    Ok(())
}

fn check_config(settings: &Settings) {
    println!("✅ Configuration is valid");
    if settings.is_mock_mode() {
        println!("⚠️  GEMINI_API_KEY not configured: running in mock mode (rule-based analysis)");
    } else {
        println!("🤖 Gemini model: {} at {}", settings.gemini.model, settings.gemini.base_url);
    }
    println!("   API: {}:{}", settings.server.host, settings.server.port);
    println!("   Dashboard port: {}", settings.server.dashboard_port);
    println!("   Regulations dir: {}", settings.storage.regulations_dir);
    println!("   Audit log dir: {}", settings.storage.audit_log_dir);
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn exit_with(e: &ComplianceError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}
