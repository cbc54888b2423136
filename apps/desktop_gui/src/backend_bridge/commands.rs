//! Backend commands queued from UI to backend worker.

use client_core::RemoteEffect;

#[derive(Debug)]
pub enum BackendCommand {
    Run(RemoteEffect),
}
