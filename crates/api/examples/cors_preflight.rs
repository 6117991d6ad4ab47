//! Serves a tiny HTML page on a second origin whose script POSTs JSON to
//! the API's token endpoint, forcing the browser through a CORS preflight.
//!
//! Run the API with this page's origin trusted, then open the page:
//!
//! ```text
//! cargo run -p marquee-api -- --cors-trusted-origin http://localhost:9000
//! cargo run -p marquee-api --example cors_preflight
//! ```

use axum::Router;
use axum::response::Html;
use clap::Parser;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
</head>
<body>
    <h1>Preflight CORS</h1>
    <div id="output"></div>
    <script>
        document.addEventListener('DOMContentLoaded', function () {
            fetch("http://localhost:4000/v1/tokens/authentication", {
                method: "POST",
                headers: {
                    'Content-Type': 'application/json'
                },
                body: JSON.stringify({
                    email: 'alice@example.com',
                    password: 'pa55word1234'
                })
            }).then(
                function (response) {
                    response.text().then(function (text) {
                        document.getElementById("output").innerHTML = text;
                    });
                },
                function (err) {
                    document.getElementById("output").innerHTML = err;
                }
            );
        });
    </script>
</body>
</html>
"#;

#[derive(Debug, Parser)]
#[command(name = "cors_preflight", about = "Static page driving a CORS preflight against the API")]
struct Args {
    /// Address to serve the page on. Must match the origin the API trusts.
    #[arg(long, default_value = "127.0.0.1:9000")]
    addr: String,
}

async fn page() -> Html<&'static str> {
    Html(PAGE)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let app = Router::new().fallback(page);

    println!("serving demo page on http://{}", args.addr);
    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .expect("failed to bind demo page address");
    axum::serve(listener, app).await.expect("demo page server failed");
}
