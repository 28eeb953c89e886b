pub mod browser_driver;
pub mod chrome_driver;
pub mod js_executor;

pub use browser_driver::BrowserDriver;
pub use chrome_driver::ChromeDriver;
pub use js_executor::JsExecutor;
