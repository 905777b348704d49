//! Side navigation and top bar of the shell.

use common::route::{Route, NAV_SECTIONS};
use common::session::AuthState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SideNavProps {
    pub current: Route,
    pub auth: AuthState,
}

pub struct SideNav;

fn is_current(item: Route, current: Route) -> bool {
    item == current || current.parent() == Some(item)
}

impl Component for SideNav {
    type Message = ();
    type Properties = SideNavProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let sections = NAV_SECTIONS
            .iter()
            .filter(|s| s.role.is_none_or(|role| props.auth.has_role(role)));

        html! {
            <nav class="side-nav">
                <a class="brand" href={Route::Home.href()}>
                    <i class="material-icons">{"hub"}</i>
                    <span>{"Middleware Console"}</span>
                </a>
                { for sections.map(|section| html! {
                    <div class="nav-section">
                        <div class="nav-section-title">
                            <i class="material-icons">{ section.icon }</i>
                            <span>{ section.title }</span>
                        </div>
                        { for section.items.iter().map(|item| html! {
                            <a class={classes!("nav-item", is_current(item.route, props.current).then_some("active"))}
                                href={item.route.href()}>
                                <i class="material-icons">{ item.icon }</i>
                                <span>{ item.label }</span>
                            </a>
                        }) }
                    </div>
                }) }
            </nav>
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TopBarProps {
    pub title: AttrValue,
    pub username: AttrValue,
    pub on_logout: Callback<()>,
}

pub struct TopBar;

impl Component for TopBar {
    type Message = ();
    type Properties = TopBarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <header class="top-bar">
                <h1>{ props.title.clone() }</h1>
                <div class="user-menu">
                    <i class="material-icons">{"account_circle"}</i>
                    <span>{ props.username.clone() }</span>
                    <button class="icon-btn" title="Sign out" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                        <i class="material-icons">{"logout"}</i>
                    </button>
                </div>
            </header>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_routes_highlight_their_list() {
        assert!(is_current(Route::SftpList, Route::SftpEdit(3)));
        assert!(is_current(Route::As2List, Route::As2New));
        assert!(!is_current(Route::SftpList, Route::As2List));
    }
}
