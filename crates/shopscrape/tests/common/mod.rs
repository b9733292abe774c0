//! Storefront fixtures served from a local mock server.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One product card on a listing page.
pub struct Card<'a> {
    pub name: &'a str,
    pub price: &'a str,
}

pub fn listing_html(cards: &[Card<'_>]) -> String {
    let items: String = cards
        .iter()
        .map(|c| {
            format!(
                r#"<li class="product type-product instock">
                     <a href="/shop/{name}/" class="woocommerce-LoopProduct-link">
                       <img src="/img/{name}.png">
                       <h2 class="woocommerce-loop-product__title">{name}</h2>
                       <span class="price"><span class="woocommerce-Price-amount amount"><span class="woocommerce-Price-currencySymbol">&pound;</span>{price}</span></span>
                     </a>
                   </li>"#,
                name = c.name,
                price = c.price.trim_start_matches('£'),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Shop</title></head><body>
           <header><ul class="menu"><li>Home</li></ul></header>
           <main id="main" class="site-main"><ul class="products columns-4">{items}</ul></main>
           </body></html>"#
    )
}

pub fn empty_listing_html() -> String {
    r#"<!DOCTYPE html><html><body><main id="main">
       <p class="woocommerce-info">No products were found matching your selection.</p>
       </main></body></html>"#
        .to_string()
}

pub fn detail_html(stock: &str, categories: &[&str], weight: &str, dimensions: &str) -> String {
    let links: Vec<String> = categories
        .iter()
        .map(|c| format!(r#"<a href="/product-category/{c}/" rel="tag">{c}</a>"#))
        .collect();

    format!(
        r#"<!DOCTYPE html><html><body><main>
           <div class="summary entry-summary">
             <h1 class="product_title">Product</h1>
             <p class="stock in-stock">{stock}</p>
             <div class="product_meta">
               <span class="sku_wrapper">SKU: <span class="sku">4391</span></span>
               <span class="posted_in">Categories: {cats}</span>
             </div>
           </div>
           <div class="woocommerce-tabs wc-tabs-wrapper">
             <table class="woocommerce-product-attributes shop_attributes">
               <tr><th>Weight</th><td class="product_weight">{weight}</td></tr>
               <tr><th>Dimensions</th><td class="product_dimensions">{dimensions}</td></tr>
             </table>
           </div>
           </main></body></html>"#,
        cats = links.join(", "),
    )
}

pub async fn mount_html(server: &MockServer, at: &str, body: String) {
    mount_html_status(server, at, 200, body).await;
}

pub async fn mount_html_status(server: &MockServer, at: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=UTF-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Listing pages 1 and 2, each with Bulbasaur and Ivysaur, plus both
/// detail pages.
pub async fn mount_two_page_shop(server: &MockServer) {
    let cards = [
        Card { name: "Bulbasaur", price: "£63.00" },
        Card { name: "Ivysaur", price: "£87.00" },
    ];
    mount_html(server, "/shop/page/1", listing_html(&cards)).await;
    mount_html(server, "/shop/page/2", listing_html(&cards)).await;
    mount_html(
        server,
        "/shop/Bulbasaur",
        detail_html("918 in stock", &["Pokemon", "Seed"], "15.2 kg", "2 x 2 x 2 cm"),
    )
    .await;
    mount_html(
        server,
        "/shop/Ivysaur",
        detail_html("500 in stock", &["Pokemon", "Seed"], "28.7 kg", "3 x 3 x 3 cm"),
    )
    .await;
}
