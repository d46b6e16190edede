pub const GREETING: &str = "Hello World!";

pub async fn get_index() -> &'static str {
    GREETING
}
