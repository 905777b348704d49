pub mod certificate_upload;
pub mod confirm_dialog;
pub mod db_field_tree;
pub mod directory_list;
pub mod form;
pub mod navigation;
pub mod secure_field;
pub mod selector;
pub mod status_indicator;
pub mod toast;
pub mod top_sheet;
pub mod xml_tree;
