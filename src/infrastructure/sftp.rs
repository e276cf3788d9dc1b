//! SFTP adapter over libssh2.
//!
//! One TCP connection, one authenticated SSH session, one SFTP channel per
//! deployment attempt. Everything is blocking; no timeouts beyond the OS
//! defaults are configured.

use std::io::Write;
use std::net::TcpStream;
use std::path::Path;

use chrono::{DateTime, Utc};
use ssh2::{Session, Sftp};
use tracing::debug;

use crate::domain::ports::{RemoteConnector, RemoteFileSystem};
use crate::domain::value_objects::SftpOptions;
use crate::error::{FerryError, FerryResult, RemoteOp};

/// Mode for directories created during a deployment
const DIR_MODE: i32 = 0o755;

/// Connects with password authentication
#[derive(Debug, Clone, Copy, Default)]
pub struct Ssh2Connector;

impl RemoteConnector for Ssh2Connector {
    type Session = SftpSession;

    fn connect(&self, options: &SftpOptions) -> FerryResult<SftpSession> {
        let address = options.address.as_str();
        let transport = |message: String| FerryError::Transport {
            address: address.to_string(),
            message,
        };

        let tcp = TcpStream::connect(address).map_err(|e| transport(e.to_string()))?;
        let mut session = Session::new().map_err(|e| transport(e.message().to_string()))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| transport(e.message().to_string()))?;
        session
            .userauth_password(&options.user, &options.password)
            .map_err(|e| transport(e.message().to_string()))?;
        if !session.authenticated() {
            return Err(transport(format!(
                "authentication rejected for user '{}'",
                options.user
            )));
        }

        let sftp = session
            .sftp()
            .map_err(|e| transport(e.message().to_string()))?;
        debug!(address, "sftp session open");

        Ok(SftpSession {
            sftp,
            transport: Transport {
                session,
                address: address.to_string(),
            },
        })
    }
}

/// An open SFTP channel and the SSH session under it.
///
/// Fields drop in declaration order: the channel closes before the
/// transport disconnects.
pub struct SftpSession {
    sftp: Sftp,
    transport: Transport,
}

/// SSH session that disconnects when dropped
struct Transport {
    session: Session,
    address: String,
}

impl Drop for Transport {
    fn drop(&mut self) {
        let _ = self.session.disconnect(None, "deployment finished", None);
        debug!(address = %self.address, "sftp session closed");
    }
}

impl RemoteFileSystem for SftpSession {
    fn mkdir(&self, path: &str) -> FerryResult<()> {
        self.sftp
            .mkdir(Path::new(path), DIR_MODE)
            .map_err(|e| FerryError::remote(RemoteOp::Mkdir, path, e.message()))
    }

    fn remove(&self, path: &str) -> FerryResult<()> {
        self.sftp
            .unlink(Path::new(path))
            .map_err(|e| FerryError::remote(RemoteOp::Remove, path, e.message()))
    }

    fn modified(&self, path: &str) -> Option<DateTime<Utc>> {
        let stat = self.sftp.stat(Path::new(path)).ok()?;
        let secs = i64::try_from(stat.mtime?).ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.sftp
            .stat(Path::new(path))
            .map(|stat| stat.is_dir())
            .unwrap_or(false)
    }

    fn create(&self, path: &str) -> FerryResult<Box<dyn Write + '_>> {
        let file = self
            .sftp
            .create(Path::new(path))
            .map_err(|e| FerryError::remote(RemoteOp::Create, path, e.message()))?;
        Ok(Box::new(file))
    }
}
