use contracts::domain::a004_material::aggregate::Material;
use leptos::prelude::*;

use crate::shared::resource_list::http_client::connect;
use crate::shared::resource_list::ui::resource_list_page;
use crate::system::auth::session::Session;

#[component]
#[allow(non_snake_case)]
pub fn MaterialList(session: Session) -> impl IntoView {
    resource_list_page(connect::<Material>(session))
}
