//! Connector configuration DTOs for the listener API.
//!
//! Each connector kind (SFTP, AS2, API) is bound to one client + interface
//! pair and carries an `active` flag that the listener honours when it
//! schedules polling or accepts inbound messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::model::client::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectorType {
    Sftp,
    As2,
    Api,
}

impl ConnectorType {
    /// Path segment used by the listener API (`/api/<segment>/config`).
    pub fn path_segment(self) -> &'static str {
        match self {
            ConnectorType::Sftp => "sftp",
            ConnectorType::As2 => "as2",
            ConnectorType::Api => "api",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectorType::Sftp => "SFTP",
            ConnectorType::As2 => "AS2",
            ConnectorType::Api => "API",
        };
        f.write_str(label)
    }
}

/// Behaviour shared by every connector configuration record.
pub trait ConnectorConfig: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    const KIND: ConnectorType;

    fn id(&self) -> Option<i64>;
    fn is_active(&self) -> bool;
    fn client(&self) -> Option<&EntityRef>;
    fn interface(&self) -> Option<&EntityRef>;
    /// Binds the record to the given client + interface pair.
    fn bind(&mut self, client: EntityRef, interface: EntityRef);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SftpConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub client: Option<EntityRef>,
    #[serde(default)]
    pub interface_config: Option<EntityRef>,
    pub host: String,
    pub port: u32,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub private_key_path: String,
    #[serde(default)]
    pub private_key_passphrase: String,
    #[serde(default)]
    pub monitored_directories: Vec<String>,
    pub processed_directory: String,
    pub error_directory: String,
    pub connection_timeout: u32,
    pub channel_timeout: u32,
    pub thread_pool_size: u32,
    pub retry_attempts: u32,
    pub retry_delay: u32,
    pub polling_interval: u32,
    #[serde(default)]
    pub active: bool,
}

impl Default for SftpConfig {
    fn default() -> Self {
        Self {
            id: None,
            client: None,
            interface_config: None,
            host: String::new(),
            port: 22,
            username: String::new(),
            password: String::new(),
            private_key_path: String::new(),
            private_key_passphrase: String::new(),
            monitored_directories: vec!["/inbound".to_string()],
            processed_directory: "/processed".to_string(),
            error_directory: "/error".to_string(),
            connection_timeout: 5000,
            channel_timeout: 30000,
            thread_pool_size: 4,
            retry_attempts: 3,
            retry_delay: 1000,
            polling_interval: 10000,
            active: true,
        }
    }
}

impl ConnectorConfig for SftpConfig {
    const KIND: ConnectorType = ConnectorType::Sftp;

    fn id(&self) -> Option<i64> {
        self.id
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn client(&self) -> Option<&EntityRef> {
        self.client.as_ref()
    }
    fn interface(&self) -> Option<&EntityRef> {
        self.interface_config.as_ref()
    }
    fn bind(&mut self, client: EntityRef, interface: EntityRef) {
        self.client = Some(client);
        self.interface_config = Some(interface);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum As2EncryptionAlgorithm {
    #[serde(rename = "3DES")]
    TripleDes,
    #[serde(rename = "AES128")]
    Aes128,
    #[serde(rename = "AES192")]
    Aes192,
    #[serde(rename = "AES256")]
    Aes256,
}

impl As2EncryptionAlgorithm {
    pub const ALL: [As2EncryptionAlgorithm; 4] = [
        As2EncryptionAlgorithm::TripleDes,
        As2EncryptionAlgorithm::Aes128,
        As2EncryptionAlgorithm::Aes192,
        As2EncryptionAlgorithm::Aes256,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            As2EncryptionAlgorithm::TripleDes => "3DES",
            As2EncryptionAlgorithm::Aes128 => "AES128",
            As2EncryptionAlgorithm::Aes192 => "AES192",
            As2EncryptionAlgorithm::Aes256 => "AES256",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum As2SignatureAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl As2SignatureAlgorithm {
    pub const ALL: [As2SignatureAlgorithm; 4] = [
        As2SignatureAlgorithm::Sha1,
        As2SignatureAlgorithm::Sha256,
        As2SignatureAlgorithm::Sha384,
        As2SignatureAlgorithm::Sha512,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            As2SignatureAlgorithm::Sha1 => "SHA1",
            As2SignatureAlgorithm::Sha256 => "SHA256",
            As2SignatureAlgorithm::Sha384 => "SHA384",
            As2SignatureAlgorithm::Sha512 => "SHA512",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum As2MdnMode {
    Sync,
    Async,
}

impl As2MdnMode {
    pub fn as_str(self) -> &'static str {
        match self {
            As2MdnMode::Sync => "SYNC",
            As2MdnMode::Async => "ASYNC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SYNC" => Some(As2MdnMode::Sync),
            "ASYNC" => Some(As2MdnMode::Async),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum As2ApiName {
    Server,
    Client,
}

impl As2ApiName {
    pub fn as_str(self) -> &'static str {
        match self {
            As2ApiName::Server => "SERVER",
            As2ApiName::Client => "CLIENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SERVER" => Some(As2ApiName::Server),
            "CLIENT" => Some(As2ApiName::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct As2Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: Option<EntityRef>,
    #[serde(default)]
    pub interface_config: Option<EntityRef>,
    pub server_id: String,
    pub partner_id: String,
    pub local_id: String,
    pub api_name: As2ApiName,
    pub encryption_algorithm: As2EncryptionAlgorithm,
    pub signature_algorithm: As2SignatureAlgorithm,
    pub compression: bool,
    pub mdn_mode: As2MdnMode,
    pub mdn_digest_algorithm: As2SignatureAlgorithm,
    pub encrypt_message: bool,
    pub sign_message: bool,
    pub request_mdn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdn_url: Option<String>,
    /// PEM encoded partner certificates.
    #[serde(default)]
    pub partner_certificates: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Default for As2Config {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            client: None,
            interface_config: None,
            server_id: String::new(),
            partner_id: String::new(),
            local_id: String::new(),
            api_name: As2ApiName::Server,
            encryption_algorithm: As2EncryptionAlgorithm::Aes256,
            signature_algorithm: As2SignatureAlgorithm::Sha256,
            compression: true,
            mdn_mode: As2MdnMode::Sync,
            mdn_digest_algorithm: As2SignatureAlgorithm::Sha256,
            encrypt_message: true,
            sign_message: true,
            request_mdn: true,
            mdn_url: None,
            partner_certificates: Vec::new(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }
}

impl As2Config {
    /// The MDN callback URL is only meaningful for asynchronous MDNs.
    pub fn mdn_url_visible(&self) -> bool {
        self.mdn_mode == As2MdnMode::Async
    }
}

impl ConnectorConfig for As2Config {
    const KIND: ConnectorType = ConnectorType::As2;

    fn id(&self) -> Option<i64> {
        self.id
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn client(&self) -> Option<&EntityRef> {
        self.client.as_ref()
    }
    fn interface(&self) -> Option<&EntityRef> {
        self.interface_config.as_ref()
    }
    fn bind(&mut self, client: EntityRef, interface: EntityRef) {
        self.client = Some(client);
        self.interface_config = Some(interface);
    }
}

/// Algorithms the listener supports, as listed by `/api/as2/algorithms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct As2Algorithms {
    #[serde(default)]
    pub encryption: Vec<String>,
    #[serde(default)]
    pub signing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub client: Option<EntityRef>,
    #[serde(default)]
    pub interface_config: Option<EntityRef>,
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: u32,
    pub retry_attempts: u32,
    pub retry_delay: u32,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub active: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            id: None,
            client: None,
            interface_config: None,
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout: 5000,
            retry_attempts: 3,
            retry_delay: 1000,
            headers: BTreeMap::new(),
            active: true,
        }
    }
}

impl ConnectorConfig for ApiConfig {
    const KIND: ConnectorType = ConnectorType::Api;

    fn id(&self) -> Option<i64> {
        self.id
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn client(&self) -> Option<&EntityRef> {
        self.client.as_ref()
    }
    fn interface(&self) -> Option<&EntityRef> {
        self.interface_config.as_ref()
    }
    fn bind(&mut self, client: EntityRef, interface: EntityRef) {
        self.client = Some(client);
        self.interface_config = Some(interface);
    }
}

/// Outcome of a test-connection call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConnectionResult {
    pub success: bool,
    pub message: String,
}

impl TestConnectionResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
