use common::model::connector::SftpConfig;
use common::route::Route;
use common::validation::FieldErrors;
use yew::prelude::*;

use super::{edit, ConnectorPage};
use crate::components::directory_list::DirectoryList;
use crate::components::form::{checkbox, number_input, text_input};
use crate::components::secure_field::SecureField;

impl ConnectorPage for SftpConfig {
    const TITLE: &'static str = "SFTP Configuration";
    const NOUN: &'static str = "SFTP configuration";

    fn list_route() -> Option<Route> {
        Some(Route::SftpList)
    }

    fn new_route() -> Option<Route> {
        Some(Route::SftpNew)
    }

    fn edit_route(id: i64) -> Option<Route> {
        Some(Route::SftpEdit(id))
    }

    fn columns() -> &'static [&'static str] {
        &["Host", "Username", "Directories", "Polling"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{}:{}", self.host, self.port),
            self.username.clone(),
            self.monitored_directories.join(", "),
            format!("{} s", self.polling_interval / 1000),
        ]
    }

    fn fields(&self, errors: &FieldErrors, on_change: Callback<Self>) -> Html {
        let err = |field: &str| errors.get(field).map(|e| AttrValue::from(e.to_string()));
        html! {
            <>
                <fieldset>
                    <legend>{"Connection"}</legend>
                    { text_input("host", "Host", &self.host, errors.get("host"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.host = v)) }
                    { number_input("port", "Port", self.port, errors.get("port"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.port = v)) }
                    { text_input("username", "Username", &self.username, errors.get("username"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.username = v)) }
                    <SecureField id="password" label="Password" value={self.password.clone()}
                        on_change={edit(self, &on_change, |c: &mut SftpConfig, v| c.password = v)} />
                    { text_input("privateKeyPath", "Private key path", &self.private_key_path, None,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.private_key_path = v)) }
                    <SecureField id="privateKeyPassphrase" label="Private key passphrase"
                        value={self.private_key_passphrase.clone()}
                        on_change={edit(self, &on_change, |c: &mut SftpConfig, v| c.private_key_passphrase = v)} />
                </fieldset>
                <fieldset>
                    <legend>{"Directories"}</legend>
                    <DirectoryList directories={self.monitored_directories.clone()}
                        error={err("monitoredDirectories")}
                        on_change={edit(self, &on_change, |c: &mut SftpConfig, v| c.monitored_directories = v)} />
                    { text_input("processedDirectory", "Processed directory", &self.processed_directory,
                        errors.get("processedDirectory"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.processed_directory = v)) }
                    { text_input("errorDirectory", "Error directory", &self.error_directory,
                        errors.get("errorDirectory"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.error_directory = v)) }
                </fieldset>
                <fieldset>
                    <legend>{"Processing"}</legend>
                    { number_input("connectionTimeout", "Connection timeout (ms)", self.connection_timeout,
                        errors.get("connectionTimeout"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.connection_timeout = v)) }
                    { number_input("channelTimeout", "Channel timeout (ms)", self.channel_timeout, None,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.channel_timeout = v)) }
                    { number_input("threadPoolSize", "Thread pool size", self.thread_pool_size,
                        errors.get("threadPoolSize"),
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.thread_pool_size = v)) }
                    { number_input("retryAttempts", "Retry attempts", self.retry_attempts, None,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.retry_attempts = v)) }
                    { number_input("retryDelay", "Retry delay (ms)", self.retry_delay, None,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.retry_delay = v)) }
                    { number_input("pollingInterval", "Polling interval (ms)", self.polling_interval, None,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.polling_interval = v)) }
                    { checkbox("active", "Active", self.active,
                        edit(self, &on_change, |c: &mut SftpConfig, v| c.active = v)) }
                </fieldset>
            </>
        }
    }
}
