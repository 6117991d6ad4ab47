use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use marquee_api::app::state::AppState;
use marquee_api::app::build_app;
use marquee_api::config::Config;
use marquee_jsonlog::Logger;
use marquee_metrics::Client;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    let logger = Logger::new(std::io::stdout(), config.log_level);
    let state = Arc::new(AppState::new(config, logger));

    if let Some(host) = state.config.graphite_host.clone() {
        start_metrics_push(state.clone(), &host).await;
    }

    let addr = format!("0.0.0.0:{}", state.config.port);
    state.logger.print_info(
        "starting server",
        Some(HashMap::from([
            ("addr".to_string(), addr.clone()),
            ("env".to_string(), state.config.env.clone()),
        ])),
    );

    let app = build_app(state.clone());

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => state.logger.print_fatal(&err, None),
    };

    if let Err(err) = axum::serve(listener, app).await {
        state.logger.print_fatal(&err, None);
    }
}

/// Connect the Graphite client and start the periodic gauge reporter. A
/// failed connection is logged and the API starts without metrics push.
async fn start_metrics_push(state: Arc<AppState>, host: &str) {
    let port = state.config.graphite_port;
    let prefix = state.config.graphite_prefix.clone();

    match Client::connect(host, port, prefix).await {
        Ok(client) => {
            tokio::spawn(report_gauges(state, client));
        }
        Err(err) => {
            let properties = HashMap::from([(
                "graphite_host".to_string(),
                format!("{host}:{port}"),
            )]);
            state.logger.print_error(&err, Some(properties));
        }
    }
}

/// Push the request counters as gauges every ten seconds.
async fn report_gauges(state: Arc<AppState>, client: Client) {
    let mut ticker = tokio::time::interval(Duration::from_secs(10));
    loop {
        ticker.tick().await;

        let snapshot = state.metrics.snapshot();
        let gauges = [
            ("requests_received", snapshot.total_requests_received as f64),
            ("responses_sent", snapshot.total_responses_sent as f64),
            (
                "processing_time_us",
                snapshot.total_processing_time_us as f64,
            ),
        ];
        for (name, value) in gauges {
            if let Err(err) = client.gauge(name, value).await {
                state.logger.print_error(&err, None);
            }
        }
    }
}
