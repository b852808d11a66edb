pub mod page_template;
