use log::debug;

use fiatlux_core::http::{ContentType, HttpMethod, ResponseHeaders};
use fiatlux_strip::{Reply, StripCommand};

use super::dependencies::strip_usecases;
use crate::core::net::http::{HttpConnection, HttpHandler, HttpResult};

const RELOAD_BODY: &str = "RELOAD";
const REDIRECT_BODY: &str = r#"<meta http-equiv="refresh" content="0; url=/index.html" />"#;

/// REST endpoints of the strip web UI
#[derive(Debug, Default)]
pub struct StripHttpController;

impl HttpHandler for StripHttpController {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let (method, path) = conn.route();
        if method != HttpMethod::Get {
            debug!("http: {:?} {} not allowed", method, path);
            return conn.write_status(ResponseHeaders::method_not_allowed()).await;
        }

        let command = StripCommand::parse(path, &conn.query());
        let (Some(command), Some(usecases)) = (command, strip_usecases()) else {
            return conn.write_not_found().await;
        };
        debug!("http: GET {}", conn.target);

        match usecases.execute(command).reply {
            Reply::Empty => conn.write_status(ResponseHeaders::success()).await,
            Reply::Reload => {
                conn.write_text(ResponseHeaders::success(), ContentType::TextPlain, RELOAD_BODY)
                    .await
            }
            Reply::Values(values) => conn.write_json(&values).await,
            Reply::Strips(list) => conn.write_json(&list).await,
            Reply::Redirect => {
                conn.write_text(ResponseHeaders::success(), ContentType::TextHtml, REDIRECT_BODY)
                    .await
            }
        }
    }
}
