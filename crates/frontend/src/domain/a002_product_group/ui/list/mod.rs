use contracts::domain::a002_product_group::aggregate::ProductGroup;
use leptos::prelude::*;

use crate::shared::resource_list::http_client::connect;
use crate::shared::resource_list::ui::resource_list_page;
use crate::system::auth::session::Session;

#[component]
#[allow(non_snake_case)]
pub fn ProductGroupList(session: Session) -> impl IntoView {
    resource_list_page(connect::<ProductGroup>(session))
}
