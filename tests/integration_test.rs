use review_harvest::browser::launch_browser;
use review_harvest::infrastructure::ChromeDriver;
use review_harvest::{logger, BrowserDriver, Collector, Config};

#[tokio::test]
#[ignore] // 需要本机安装 Chrome，手动运行：cargo test -- --ignored
async fn test_browser_launch_and_source() {
    logger::init();

    let (browser, page) = launch_browser(true).await.expect("启动浏览器失败");
    let driver = ChromeDriver::new(browser, page, true);

    driver
        .goto("data:text/html,<a id='tab' href='#r'>reviews</a>")
        .await
        .expect("导航失败");
    assert!(driver.page_source().await.unwrap().contains("reviews"));
    assert!(driver.try_click("#tab").await.unwrap());
    assert!(!driver.try_click("#missing").await.unwrap());
    assert!(driver.try_click_text("a", "review").await.unwrap());
    assert!(!driver.try_click_text("a", "absent").await.unwrap());

    driver.close().await.expect("关闭浏览器失败");
}

#[tokio::test]
#[ignore]
async fn test_live_collection_single_keyword() {
    logger::init();

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        keywords: vec!["샌드위치".to_string()],
        max_products_per_keyword: 1,
        max_reviews_per_product: 3,
        output_dir: dir.path().to_path_buf(),
        headless: true,
        ..Config::default()
    };

    let (browser, page) = launch_browser(config.headless).await.expect("启动浏览器失败");
    let driver = ChromeDriver::new(browser, page, true);

    let report = Collector::new(&config)
        .unwrap()
        .run(&driver)
        .await
        .expect("写出结果失败");

    println!("采集结果: {:?}", report);
    assert!(config.output_path().exists());
    assert!(report.products_visited <= 1);
}
