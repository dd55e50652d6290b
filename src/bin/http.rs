#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use ta_planner::{PlannerConfig, TaPlanner, http_api, logging};

    logging::init();

    let addr: SocketAddr = std::env::var("TA_PLANNER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let planner = TaPlanner::from_config(PlannerConfig::from_env()?)?;
    println!("ta-planner HTTP API listening on http://{addr}");
    http_api::serve(addr, planner).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
