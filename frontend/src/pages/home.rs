use common::route::Route;
use yew::prelude::*;

struct Section {
    title: &'static str,
    icon: &'static str,
    description: &'static str,
    links: &'static [(&'static str, Route)],
    coming_soon: bool,
}

const SECTIONS: &[Section] = &[
    Section {
        title: "Listener",
        icon: "settings_input_component",
        description: "Inbound connectors that receive files and messages from partners.",
        links: &[
            ("API", Route::ApiConfig),
            ("SFTP", Route::SftpList),
            ("AS2", Route::As2List),
            ("Monitoring", Route::Monitoring),
        ],
        coming_soon: false,
    },
    Section {
        title: "Dispatch",
        icon: "send",
        description: "Outbound delivery of processed documents.",
        links: &[],
        coming_soon: true,
    },
    Section {
        title: "Inbound",
        icon: "cloud_upload",
        description: "Clients, interfaces and XML to database mappings.",
        links: &[
            ("Clients", Route::Clients),
            ("Interfaces", Route::Interfaces),
            ("Transform", Route::Transform),
        ],
        coming_soon: false,
    },
];

pub struct HomePage;

impl Component for HomePage {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="page home">
                <div class="card-grid">
                    { for SECTIONS.iter().map(|section| html! {
                        <div class={classes!("card", section.coming_soon.then_some("disabled"))}>
                            <div class="card-title">
                                <i class="material-icons">{ section.icon }</i>
                                <h3>{ section.title }</h3>
                                if section.coming_soon {
                                    <span class="tree-badge">{"coming soon"}</span>
                                }
                            </div>
                            <p>{ section.description }</p>
                            <div class="card-links">
                                { for section.links.iter().map(|(label, route)| html! {
                                    <a href={route.href()}>{ *label }</a>
                                }) }
                            </div>
                        </div>
                    }) }
                </div>
            </div>
        }
    }
}
