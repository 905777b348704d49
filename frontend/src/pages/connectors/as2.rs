use common::error::ApiResult;
use common::model::connector::{
    As2Algorithms, As2ApiName, As2Config, As2EncryptionAlgorithm, As2MdnMode, As2SignatureAlgorithm,
};
use common::route::Route;
use common::validation::FieldErrors;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{edit, ConnectorPage};
use crate::api::connectors::as2_algorithms;
use crate::components::certificate_upload::CertificateUpload;
use crate::components::form::{checkbox, select, text_input};
use crate::context::auth::AuthContext;

impl ConnectorPage for As2Config {
    const TITLE: &'static str = "AS2 Configuration";
    const NOUN: &'static str = "AS2 configuration";

    fn list_route() -> Option<Route> {
        Some(Route::As2List)
    }

    fn new_route() -> Option<Route> {
        Some(Route::As2New)
    }

    fn edit_route(id: i64) -> Option<Route> {
        Some(Route::As2Edit(id))
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Partner", "Local", "Encryption", "MDN"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.partner_id.clone(),
            self.local_id.clone(),
            self.encryption_algorithm.as_str().to_string(),
            self.mdn_mode.as_str().to_string(),
        ]
    }

    fn fields(&self, errors: &FieldErrors, on_change: Callback<Self>) -> Html {
        html! { <As2Fields config={self.clone()} errors={errors.clone()} {on_change} /> }
    }
}

/// Options offered for an algorithm select: the ones the listener reports,
/// or every known one when it reports none.
fn offered<T: Copy>(
    all: &[T],
    listed: &[String],
    name: impl Fn(T) -> &'static str,
) -> Vec<(String, String)> {
    all.iter()
        .map(|a| name(*a))
        .filter(|n| listed.is_empty() || listed.iter().any(|l| l == n))
        .map(|n| (n.to_string(), n.to_string()))
        .collect()
}

pub enum Msg {
    AlgorithmsLoaded(ApiResult<As2Algorithms>),
}

#[derive(Properties, PartialEq)]
pub struct As2FieldsProps {
    pub config: As2Config,
    pub errors: FieldErrors,
    pub on_change: Callback<As2Config>,
}

pub struct As2Fields {
    algorithms: As2Algorithms,
}

impl Component for As2Fields {
    type Message = Msg;
    type Properties = As2FieldsProps;

    fn create(ctx: &Context<Self>) -> Self {
        if let Some((auth, _)) = ctx.link().context::<AuthContext>(Callback::noop()) {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = as2_algorithms(&auth.api).await;
                link.send_message(Msg::AlgorithmsLoaded(result));
            });
        }
        Self {
            algorithms: As2Algorithms::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AlgorithmsLoaded(Ok(algorithms)) => {
                self.algorithms = algorithms;
                true
            }
            Msg::AlgorithmsLoaded(Err(err)) => {
                gloo_console::warn!(format!("Failed to load AS2 algorithms: {}", err));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let config = &props.config;
        let errors = &props.errors;
        let on_change = &props.on_change;

        let encryption = offered(
            &As2EncryptionAlgorithm::ALL,
            &self.algorithms.encryption,
            As2EncryptionAlgorithm::as_str,
        );
        let signing = offered(
            &As2SignatureAlgorithm::ALL,
            &self.algorithms.signing,
            As2SignatureAlgorithm::as_str,
        );
        let api_names = [As2ApiName::Server, As2ApiName::Client]
            .map(|a| (a.as_str().to_string(), a.as_str().to_string()));
        let mdn_modes = [As2MdnMode::Sync, As2MdnMode::Async]
            .map(|m| (m.as_str().to_string(), m.as_str().to_string()));

        html! {
            <>
                <fieldset>
                    <legend>{"Identification"}</legend>
                    { text_input("name", "Name", &config.name, errors.get("name"),
                        edit(config, on_change, |c: &mut As2Config, v| c.name = v)) }
                    { text_input("serverId", "Server ID", &config.server_id, errors.get("serverId"),
                        edit(config, on_change, |c: &mut As2Config, v| c.server_id = v)) }
                    { text_input("partnerId", "Partner ID", &config.partner_id, errors.get("partnerId"),
                        edit(config, on_change, |c: &mut As2Config, v| c.partner_id = v)) }
                    { text_input("localId", "Local ID", &config.local_id, errors.get("localId"),
                        edit(config, on_change, |c: &mut As2Config, v| c.local_id = v)) }
                    { select("apiName", "API", &api_names, config.api_name.as_str(),
                        edit(config, on_change, |c: &mut As2Config, v: String| {
                            if let Some(name) = As2ApiName::parse(&v) { c.api_name = name; }
                        })) }
                </fieldset>
                <fieldset>
                    <legend>{"Security"}</legend>
                    { select("encryptionAlgorithm", "Encryption", &encryption, config.encryption_algorithm.as_str(),
                        edit(config, on_change, |c: &mut As2Config, v: String| {
                            if let Some(a) = As2EncryptionAlgorithm::parse(&v) { c.encryption_algorithm = a; }
                        })) }
                    { select("signatureAlgorithm", "Signature", &signing, config.signature_algorithm.as_str(),
                        edit(config, on_change, |c: &mut As2Config, v: String| {
                            if let Some(a) = As2SignatureAlgorithm::parse(&v) { c.signature_algorithm = a; }
                        })) }
                    { checkbox("encryptMessage", "Encrypt messages", config.encrypt_message,
                        edit(config, on_change, |c: &mut As2Config, v| c.encrypt_message = v)) }
                    { checkbox("signMessage", "Sign messages", config.sign_message,
                        edit(config, on_change, |c: &mut As2Config, v| c.sign_message = v)) }
                    { checkbox("compression", "Compression", config.compression,
                        edit(config, on_change, |c: &mut As2Config, v| c.compression = v)) }
                    <CertificateUpload certificates={config.partner_certificates.clone()}
                        on_change={edit(config, on_change, |c: &mut As2Config, v| c.partner_certificates = v)} />
                </fieldset>
                <fieldset>
                    <legend>{"MDN"}</legend>
                    { checkbox("requestMdn", "Request MDN", config.request_mdn,
                        edit(config, on_change, |c: &mut As2Config, v| c.request_mdn = v)) }
                    { select("mdnMode", "MDN mode", &mdn_modes, config.mdn_mode.as_str(),
                        edit(config, on_change, |c: &mut As2Config, v: String| {
                            if let Some(mode) = As2MdnMode::parse(&v) { c.mdn_mode = mode; }
                        })) }
                    { select("mdnDigestAlgorithm", "MDN digest", &signing, config.mdn_digest_algorithm.as_str(),
                        edit(config, on_change, |c: &mut As2Config, v: String| {
                            if let Some(a) = As2SignatureAlgorithm::parse(&v) { c.mdn_digest_algorithm = a; }
                        })) }
                    if config.mdn_url_visible() {
                        { text_input("mdnUrl", "MDN URL", config.mdn_url.as_deref().unwrap_or_default(),
                            errors.get("mdnUrl"),
                            edit(config, on_change, |c: &mut As2Config, v: String| {
                                c.mdn_url = (!v.trim().is_empty()).then_some(v);
                            })) }
                    }
                    { checkbox("active", "Active", config.active,
                        edit(config, on_change, |c: &mut As2Config, v| c.active = v)) }
                </fieldset>
            </>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_only_listed_algorithms() {
        let listed = vec!["AES128".to_string(), "AES256".to_string()];
        let options =
            offered(&As2EncryptionAlgorithm::ALL, &listed, As2EncryptionAlgorithm::as_str);
        let values: Vec<&str> = options.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, vec!["AES128", "AES256"]);

        let all = offered(&As2SignatureAlgorithm::ALL, &[], As2SignatureAlgorithm::as_str);
        assert_eq!(all.len(), 4);
    }
}
