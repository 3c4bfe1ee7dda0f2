use rocket::{
    Request, Response,
    fairing::{Fairing, Info, Kind},
};
use tracing::{info, warn};

/// Logs the method, path and outcome of every handled request.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let status = response.status();
        if status.code >= 400 {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                status = status.code,
                "Request failed"
            );
        } else {
            info!(
                method = %request.method(),
                path = %request.uri().path(),
                status = status.code,
                "Handled request"
            );
        }
    }
}
