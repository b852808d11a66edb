use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub inputs: String,
    pub options: InputSpecOptions,
    pub parameters: InputSpecParameters,
}

#[derive(Debug, Serialize)]
pub struct InputSpecOptions {
    pub guidance_scale: f64,
}

#[derive(Debug, Serialize)]
pub struct InputSpecParameters {
    pub height: u32,
    pub width: u32,
}
