use crate::encoding::TextEncoding;
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The scenario is empty, there is nothing to export")]
    EmptyScenario,
    #[error("The chunk threshold should be greater than zero")]
    InvalidChunkThreshold,
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
    #[error("Character {character:?} can't be encoded as {encoding}")]
    UnmappableCharacter {
        character: char,
        encoding: TextEncoding,
    },
    #[error("Couldn't dump the body of request {request_id} to {}: {source}", .path.display())]
    BodyDump {
        request_id: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't write the simulation to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Renderer error: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}
