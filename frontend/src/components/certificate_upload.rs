//! Partner certificates of an AS2 configuration. Files are read in the
//! browser and only PEM encoded certificates are accepted.

use common::validation::is_pem_certificate;
use gloo_file::futures::read_as_text;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::form::row_action;
use super::toast::{show_toast, Severity};

pub enum Msg {
    FilesSelected(Vec<web_sys::File>),
    Read { name: String, content: String },
    Remove(usize),
}

#[derive(Properties, PartialEq)]
pub struct CertificateUploadProps {
    pub certificates: Vec<String>,
    pub on_change: Callback<Vec<String>>,
}

pub struct CertificateUpload {
    input_ref: NodeRef,
}

/// First line after the PEM header, enough to tell certificates apart.
fn fingerprint(certificate: &str) -> String {
    certificate
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("-----"))
        .map(|line| line.chars().take(32).collect())
        .unwrap_or_default()
}

impl Component for CertificateUpload {
    type Message = Msg;
    type Properties = CertificateUploadProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesSelected(files) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    for file in files {
                        let file = gloo_file::File::from(file);
                        let name = file.name();
                        match read_as_text(&file).await {
                            Ok(content) => link.send_message(Msg::Read { name, content }),
                            Err(err) => {
                                gloo_console::error!(format!("Failed to read {}: {}", name, err));
                                show_toast(&format!("Could not read {}", name), Severity::Error);
                            }
                        }
                    }
                });
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
                false
            }
            Msg::Read { name, content } => {
                if !is_pem_certificate(&content) {
                    show_toast(&format!("{} is not a PEM certificate", name), Severity::Error);
                    return false;
                }
                let mut certificates = ctx.props().certificates.clone();
                certificates.push(content);
                ctx.props().on_change.emit(certificates);
                show_toast(&format!("{} added", name), Severity::Success);
                false
            }
            Msg::Remove(index) => {
                let mut certificates = ctx.props().certificates.clone();
                if index < certificates.len() {
                    certificates.remove(index);
                    ctx.props().on_change.emit(certificates);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onchange = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut files = Vec::new();
            if let Some(list) = input.files() {
                for i in 0..list.length() {
                    if let Some(file) = list.get(i) {
                        files.push(file);
                    }
                }
            }
            Msg::FilesSelected(files)
        });

        html! {
            <div class="form-field certificate-upload">
                <label>{"Partner certificates"}</label>
                <ul>
                    { for ctx.props().certificates.iter().enumerate().map(|(index, cert)| html! {
                        <li>
                            <i class="material-icons">{"verified"}</i>
                            <code>{ fingerprint(cert) }</code>
                            { row_action("delete", "Remove certificate", link.callback(move |_| Msg::Remove(index))) }
                        </li>
                    }) }
                </ul>
                <input ref={self.input_ref.clone()} type="file" multiple=true
                    accept=".pem,.crt,.cer" {onchange} />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_skips_armor() {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIDdzCCAl+gAwIBAgIEAgAAuTANBgkqhkiG9w0BAQUFADBaMQsw\n-----END CERTIFICATE-----\n";
        assert_eq!(fingerprint(pem), "MIIDdzCCAl+gAwIBAgIEAgAAuTANBgkq");
        assert_eq!(fingerprint(""), "");
    }
}
