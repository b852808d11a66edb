use axum::response::Html;

use crate::generate::{
    dtos::generate_image_dto::GenerateImageDto, templates::page_template::render_page,
};

pub async fn get_root() -> Html<String> {
    Html(render_page(&GenerateImageDto::default(), None))
}
