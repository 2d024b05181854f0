use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::aggregate::{run_from_files, PipelineOutput};
use crate::config::AppConfig;
use crate::error::DataError;

pub mod api;
pub mod routes;

/// Process the configured dataset once. Requests only read the result.
pub fn prepare_state(config: &AppConfig) -> Result<PipelineOutput, DataError> {
    run_from_files(
        &config.champions_path,
        &config.combos_path,
        &config.pipeline_options(),
    )
}

pub fn run_server(config: &AppConfig) -> std::io::Result<()> {
    let state = prepare_state(config).map_err(std::io::Error::other)?;
    let listener = TcpListener::bind(&config.bind_addr)?;
    tracing::info!(
        addr = %config.bind_addr,
        champions = state.champions.len(),
        combos = state.statistics.total_combos,
        "combodex server listening"
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&state, &mut stream) {
                    tracing::warn!(error = %err, "request error");
                }
            }
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(state: &PipelineOutput, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(state, method, path, body);
    tracing::debug!(method, path, status = response.status_code, "handled request");
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}
