//! Check command - run a file through the caching interceptor

use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::error::{StampError, StampResult};
use crate::interceptor::{CachingDecision, CachingInterceptor};
use crate::transport::{
    Handler, HttpRequest, HttpResponse, SimpleRequest, SimpleResponse, IF_NONE_MATCH,
};
use async_trait::async_trait;
use console::style;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Serves a file from disk with a fixed status
struct FileHandler {
    path: PathBuf,
    status: u16,
}

#[async_trait]
impl Handler for FileHandler {
    type Request = SimpleRequest;
    type Response = SimpleResponse;

    async fn handle(&self, request: &SimpleRequest) -> StampResult<SimpleResponse> {
        debug!("Serving {} for {}", self.path.display(), request.method());
        let body = fs::read(&self.path)
            .await
            .map_err(|e| StampError::io(format!("reading {}", self.path.display()), e))?;
        Ok(SimpleResponse::new(self.status, body))
    }
}

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> StampResult<()> {
    let interceptor = CachingInterceptor::new(config.interceptor_config()?);
    let handler = FileHandler {
        path: args.file,
        status: args.status,
    };

    let request = args
        .if_none_match
        .into_iter()
        .fold(SimpleRequest::new(args.method), |request, value| {
            request.add_header(IF_NONE_MATCH, value)
        });

    let (response, decision) = interceptor.evaluate(&request, &handler).await?;

    if args.json {
        print_json(&response, decision)?;
    } else {
        print_text(&response, decision);
    }

    Ok(())
}

fn print_text(response: &SimpleResponse, decision: CachingDecision) {
    let status = format!("{} {}", response.status_code(), response.reason());
    let status = match decision {
        CachingDecision::NotModified => style(status).cyan().bold(),
        CachingDecision::Annotate => style(status).green().bold(),
        CachingDecision::PassThrough => style(status).bold(),
    };
    println!("{} ({})", status, style(decision).dim());

    for (name, value) in response.headers() {
        println!("{}: {}", style(name).bold(), value);
    }

    if response.carries_body() {
        println!("\n[{} body bytes]", response.body_bytes().len());
    } else {
        println!("\n[body suppressed]");
    }
}

fn print_json(response: &SimpleResponse, decision: CachingDecision) -> StampResult<()> {
    let headers: Vec<serde_json::Value> = response
        .headers()
        .map(|(name, value)| serde_json::json!({ "name": name, "value": value }))
        .collect();

    let body_bytes = if response.carries_body() {
        response.body_bytes().len()
    } else {
        0
    };

    let output = serde_json::json!({
        "status": response.status_code(),
        "reason": response.reason(),
        "decision": decision.to_string(),
        "headers": headers,
        "body_bytes": body_bytes,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
