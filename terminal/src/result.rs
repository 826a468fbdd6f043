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

use storyhost_ansicodec::{AnsiError, TelnetCodecError};

/// Result type for the terminal
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Errors raised while turning a byte stream into edited lines.
#[derive(Debug)]
pub enum TerminalError {
    /// The underlying stream failed.
    IOError(std::io::Error),
    /// The telnet layer failed.
    CodecError(TelnetCodecError),
    /// The ANSI layer failed.
    AnsiError(AnsiError),
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalError::IOError(err) => write!(f, "I/O error: {}", err),
            TerminalError::CodecError(err) => write!(f, "telnet error: {}", err),
            TerminalError::AnsiError(err) => write!(f, "ansi error: {}", err),
        }
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerminalError::IOError(err) => Some(err),
            TerminalError::CodecError(err) => Some(err),
            TerminalError::AnsiError(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TerminalError {
    fn from(error: std::io::Error) -> Self {
        TerminalError::IOError(error)
    }
}

impl From<TelnetCodecError> for TerminalError {
    fn from(error: TelnetCodecError) -> Self {
        TerminalError::CodecError(error)
    }
}

impl From<AnsiError> for TerminalError {
    fn from(error: AnsiError) -> Self {
        TerminalError::AnsiError(error)
    }
}

impl TerminalError {
    /// Returns `true` when the error came from the transport rather than from decoding.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            TerminalError::IOError(_) | TerminalError::AnsiError(AnsiError::IoError(_))
        )
    }
}
