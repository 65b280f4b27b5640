use focusflow_core::gateway::analyze_sessions;
use focusflow_core::{ApiKeyStore, Config, GatewayError, GeminiClient, SessionStore, SqliteStore};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let sessions = SessionStore::new(&store).list()?;

    let api_key = ApiKeyStore::new(&store)
        .get()?
        .ok_or(GatewayError::MissingApiKey)?;
    let client = GeminiClient::new(api_key);

    let runtime = tokio::runtime::Runtime::new()?;
    let analysis = runtime.block_on(analyze_sessions(
        &client,
        &config.gateway.analysis_model,
        &sessions,
    ))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Summary\n  {}\n", analysis.summary);
    println!("Tip\n  {}\n", analysis.tip);
    println!("Indicators");
    print_indicator("stress", analysis.indicators.stress);
    print_indicator("happiness", analysis.indicators.happiness);
    print_indicator("concentration", analysis.indicators.concentration);
    print_indicator("fatigue", analysis.indicators.fatigue);
    Ok(())
}

fn print_indicator(name: &str, value: u8) {
    let filled = (value as usize) / 5;
    println!(
        "  {name:<14} [{}{}] {value:>3}",
        "#".repeat(filled),
        "-".repeat(20 - filled)
    );
}
