//! Domain Ports
//!
//! Interfaces the application layer depends on. Infrastructure provides the
//! production implementations; tests provide in-memory ones.

mod confirmer;
mod deploy_events;
mod object_store;
mod preflight;

pub use confirmer::{confirm, confirm_phrase, is_affirmative, AlwaysDecline, AutoConfirm, Confirmer};
pub use deploy_events::{DeployEvent, DeployEventSink, DeployStep, NoopEventSink};
pub use object_store::{
    CannedAcl, ObjectPage, ObjectStore, ObjectVersion, PutObject, RemoteBucket, StoreConnector,
    StoreError, StoreResult, VersionMarker, VersionPage, WebsiteDocuments,
};
pub use preflight::{origin_allowed, PreflightProbe, PreflightResponse};
