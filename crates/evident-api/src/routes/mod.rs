//! # HTTP Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/v1/metadata` | single rule metadata |
//! | POST | `/v1/metadata/batch` | batch rule metadata |
//! | POST | `/v1/enrich` | metadata plus verdict for one piece of evidence |
//! | GET | `/health/liveness` | process is up |
//! | GET | `/health/readiness` | version, catalogs and plan version |

pub mod health;
pub mod metadata;
