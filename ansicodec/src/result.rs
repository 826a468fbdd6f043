//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Error types for the ansicodec crate.

use storyhost_telnetcodec::CodecError;

/// Result type alias for operations that may fail with an [`AnsiError`].
pub type AnsiResult<T> = Result<T, AnsiError>;

/// Errors surfaced by [`crate::AnsiCodec`].
///
/// Malformed escape sequences are not errors, the parser drops them.
#[derive(Debug)]
pub enum AnsiError {
    /// IO Error
    IoError(std::io::Error),
    /// The wrapped telnet layer failed.
    Telnet(CodecError),
}

impl std::fmt::Display for AnsiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnsiError::IoError(err) => {
                write!(f, "IOError {}", err)
            }
            AnsiError::Telnet(err) => {
                write!(f, "Telnet codec error: {}", err)
            }
        }
    }
}

impl std::error::Error for AnsiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnsiError::IoError(err) => Some(err),
            AnsiError::Telnet(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnsiError {
    fn from(error: std::io::Error) -> Self {
        AnsiError::IoError(error)
    }
}

impl From<CodecError> for AnsiError {
    fn from(error: CodecError) -> Self {
        AnsiError::Telnet(error)
    }
}

impl From<AnsiError> for std::io::Error {
    fn from(error: AnsiError) -> Self {
        match error {
            AnsiError::IoError(err) => err,
            AnsiError::Telnet(err) => err.into(),
        }
    }
}
