//! Sigforest core library.
//!
//! Groups canonically keyed items into components with a keyed union-find
//! forest, enumerates the live components in a stable order, and (with the
//! `search` feature) drives a random-walk connectivity search over them.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
#[cfg(feature = "search")]
mod connect;
mod error;
mod keyset;

pub use crate::{
    codec::KeyCodec,
    error::{
        CodecFailure, FormatError, FormatErrorCode, KeySetError, KeySetErrorCode,
        ReconstructionError, Result,
    },
    keyset::{ComponentHandle, Components, ElementId, Items, KeyedDisjointSet, Keys},
};

#[cfg(feature = "search")]
#[cfg_attr(docsrs, doc(cfg(feature = "search")))]
pub use crate::connect::{
    ConnectReport, Connector, ConnectorBuilder, ConnectorError, ConnectorErrorCode, Phase,
    PhaseParams, RandomWalk,
};
