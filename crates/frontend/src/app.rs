use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_product_group::ui::list::ProductGroupList;
use crate::domain::a003_product_type::ui::list::ProductTypeList;
use crate::domain::a004_material::ui::list::MaterialList;
use crate::domain::a005_material_composition::ui::list::MaterialCompositionList;
use crate::domain::a006_product_composition::ui::list::ProductCompositionList;
use crate::domain::a007_component::ui::list::ComponentList;
use crate::domain::a008_vendor::ui::list::VendorList;
use crate::domain::a008_vendor::ui::onboarding::VendorOnboarding;
use crate::shared::icons::icon;
use crate::system::auth::session::Session;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Products,
    ProductGroups,
    ProductTypes,
    Materials,
    MaterialCompositions,
    ProductCompositions,
    Components,
    Vendors,
    VendorOnboarding,
}

impl Screen {
    const ALL: [Screen; 9] = [
        Screen::Products,
        Screen::ProductGroups,
        Screen::ProductTypes,
        Screen::Materials,
        Screen::MaterialCompositions,
        Screen::ProductCompositions,
        Screen::Components,
        Screen::Vendors,
        Screen::VendorOnboarding,
    ];

    fn title(&self) -> &'static str {
        match self {
            Screen::Products => "Products",
            Screen::ProductGroups => "Product Groups",
            Screen::ProductTypes => "Product Types",
            Screen::Materials => "Materials",
            Screen::MaterialCompositions => "Material Compositions",
            Screen::ProductCompositions => "Product Compositions",
            Screen::Components => "Components",
            Screen::Vendors => "Vendors",
            Screen::VendorOnboarding => "Vendor Onboarding",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Screen::Products => "products",
            Screen::ProductGroups => "groups",
            Screen::ProductTypes => "types",
            Screen::Materials => "materials",
            Screen::MaterialCompositions | Screen::ProductCompositions => "compositions",
            Screen::Components => "components",
            Screen::Vendors | Screen::VendorOnboarding => "vendors",
        }
    }

    fn render(&self, session: Session) -> AnyView {
        match self {
            Screen::Products => view! { <ProductList session=session /> }.into_any(),
            Screen::ProductGroups => view! { <ProductGroupList session=session /> }.into_any(),
            Screen::ProductTypes => view! { <ProductTypeList session=session /> }.into_any(),
            Screen::Materials => view! { <MaterialList session=session /> }.into_any(),
            Screen::MaterialCompositions => {
                view! { <MaterialCompositionList session=session /> }.into_any()
            }
            Screen::ProductCompositions => {
                view! { <ProductCompositionList session=session /> }.into_any()
            }
            Screen::Components => view! { <ComponentList session=session /> }.into_any(),
            Screen::Vendors => view! { <VendorList session=session /> }.into_any(),
            Screen::VendorOnboarding => view! { <VendorOnboarding session=session /> }.into_any(),
        }
    }
}

/// Sidebar with one entry per screen; switching screens disposes the previous one
#[component]
pub fn App(session: Session) -> impl IntoView {
    let current = RwSignal::new(Screen::Products);
    let session = StoredValue::new(session);

    view! {
        <div class="app">
            <nav class="sidebar">
                <div class="sidebar__title">"EPR Vault"</div>
                {Screen::ALL
                    .into_iter()
                    .map(|screen| view! {
                        <button
                            class=move || if current.get() == screen { "sidebar__item sidebar__item--active" } else { "sidebar__item" }
                            on:click=move |_| current.set(screen)
                        >
                            {icon(screen.icon())}
                            <span>{screen.title()}</span>
                        </button>
                    })
                    .collect_view()}
            </nav>
            <main class="app__main">
                {move || current.get().render(session.get_value())}
            </main>
        </div>
    }
}
