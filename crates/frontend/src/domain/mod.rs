pub mod a001_product;
pub mod a002_product_group;
pub mod a003_product_type;
pub mod a004_material;
pub mod a005_material_composition;
pub mod a006_product_composition;
pub mod a007_component;
pub mod a008_vendor;
