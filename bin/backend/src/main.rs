//! Commune Backend Binary
//!
//! Serves the account and session API on BIND_ADDR (e.g. 0.0.0.0:8888).

#[tokio::main]
async fn main() {
    cmn_core::log();
    cmn_server::run().await.unwrap();
}
