//! Catalog browsing commands.

use bazaar_core::ProductId;

use super::{CliError, client, product_line};

/// Print catalog products, at most `limit` of them.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn products(limit: Option<usize>) -> Result<(), CliError> {
    let products = client()?.get_products().await?;
    let total = products.len();
    let shown = limit.unwrap_or(total);

    for product in products.iter().take(shown) {
        println!("{}", product_line(product));
    }
    if shown < total {
        println!("... {} more", total - shown);
    }
    Ok(())
}

/// Print category names.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn categories() -> Result<(), CliError> {
    for category in client()?.get_categories().await? {
        println!("{category}");
    }
    Ok(())
}

/// Print one product in detail.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog cannot be
/// fetched.
#[allow(clippy::print_stdout)]
pub async fn show(id: ProductId) -> Result<(), CliError> {
    let product = client()?.get_product(id).await?;

    println!("{}", product.title);
    println!("  id:        {}", product.id);
    println!("  category:  {}", product.category);
    match product.compare_at_price() {
        Some(original) => println!(
            "  price:     {} (was {original}, {}% off)",
            product.price, product.discount_percentage
        ),
        None => println!("  price:     {}", product.price),
    }
    if let Some(rating) = product.rating {
        println!("  rating:    {:.1} ({} reviews)", rating.rate, rating.count);
    }
    for image in &product.images {
        println!("  image:     {image}");
    }
    if let Some(description) = &product.description {
        println!();
        println!("{description}");
    }
    Ok(())
}
