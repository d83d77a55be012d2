//! Newline-delimited JSON-RPC over a byte stream (stdin/stdout in production).

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::dispatch::handle_text;
use crate::state::AppState;

/// Serve messages until the reader hits EOF.
///
/// One message per line, one response line per request. Blank lines are
/// skipped. Nothing is written for notifications. Lines that are not valid
/// UTF-8 are decoded lossily and answered with a parse error.
pub async fn serve<R, W>(state: &AppState, mut reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    info!("MCP stdio transport ready");

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = handle_text(state, line).await else {
            continue;
        };

        let mut out = match serde_json::to_vec(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode response");
                continue;
            }
        };
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    debug!("MCP stdio input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use steamgames_core::testing::{
        fixtures, MockCatalogProvider, MockGameLibrary, MockHttpClient,
    };
    use steamgames_core::load_config_from_str;
    use tokio::io::BufReader;

    use super::*;

    fn test_state() -> AppState {
        let config = load_config_from_str(
            r#"
[steam]
api_key = "key"
steam_id = "7656119"
"#,
        )
        .unwrap();
        AppState::new(
            config,
            Arc::new(MockCatalogProvider::with_entries(fixtures::catalog())),
            Arc::new(MockHttpClient::new()),
            Arc::new(MockGameLibrary::new()),
        )
    }

    async fn run(input: &str) -> Vec<Value> {
        let state = test_state();
        let mut output = Vec::new();
        serve(&state, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_response_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );

        let responses = run(input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(responses[1], json!({"jsonrpc": "2.0", "id": 2, "result": {}}));
    }

    #[tokio::test]
    async fn test_garbage_line_gets_parse_error() {
        let responses = run("not json\n").await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_search_over_stdio() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"search-apps","arguments":{"query":"portal","limit":2}}}"#,
            "\n",
        );

        let responses = run(input).await;
        let text = responses[0]["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();

        assert_eq!(responses[0]["id"], "a");
        assert_eq!(payload["total_results"], 2);
        assert_eq!(payload["results"][0]["name"], "Portal");
    }

    #[tokio::test]
    async fn test_writes_exact_response_line() {
        let state = test_state();
        let reader = tokio_test::io::Builder::new()
            .read(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n")
            .build();
        let writer = tokio_test::io::Builder::new()
            .write(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"result\":{}}\n")
            .build();

        serve(&state, BufReader::new(reader), writer).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_serving() {
        let state = test_state();
        let input: &[u8] = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&state, BufReader::new(input), &mut output)
            .await
            .unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1], json!({"jsonrpc": "2.0", "id": 2, "result": {}}));
    }

    #[tokio::test]
    async fn test_last_line_without_newline_is_served() {
        let responses = run(r#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#).await;
        assert_eq!(responses, vec![json!({"jsonrpc": "2.0", "id": 9, "result": {}})]);
    }

    #[tokio::test]
    async fn test_empty_input_writes_nothing() {
        assert!(run("").await.is_empty());
    }
}
