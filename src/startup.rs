use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::configuration::ScraperSettings;
use crate::routes::{default_route, review_route};

pub fn run(
    listener: TcpListener,
    scraper_settings: ScraperSettings,
) -> Result<Server, std::io::Error> {
    let scraper_settings = web::Data::new(scraper_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/tool").service(review_route::scrape_reviews))
            .app_data(scraper_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
