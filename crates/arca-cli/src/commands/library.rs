use anyhow::Result;
use arca_application::RefreshOutcome;
use arca_core::library::NewPhysicalBook;

use super::{Context, print_json};

pub async fn list_books(ctx: &Context) -> Result<()> {
    let books = ctx.client().books().list().await?;
    for book in &books {
        println!("{:>5}  [{}] {}", book.id, book.formato, book.display_title());
    }
    println!("{} libros digitales", books.len());
    Ok(())
}

pub async fn scan(ctx: &Context) -> Result<()> {
    let message = ctx.client().books().scan().await?;
    println!("{}", message.mensaje);
    Ok(())
}

pub async fn sync_drive(ctx: &Context) -> Result<()> {
    let message = ctx.client().books().sync_drive().await?;
    println!("{}", message.mensaje);
    Ok(())
}

pub fn view_url(ctx: &Context, file_id: &str) {
    println!("{}", ctx.client().books().view_url(file_id));
}

pub async fn list_physical(ctx: &Context) -> Result<()> {
    let books = ctx.client().physical_books().list().await?;
    for book in &books {
        let author = book.autor.as_deref().unwrap_or("-");
        println!("{:>5}  {} ({})", book.id, book.titulo, author);
    }
    println!("{} libros físicos", books.len());
    Ok(())
}

pub async fn isbn(ctx: &Context, isbn: &str, add: bool) -> Result<()> {
    let lookup = ctx.client().physical_books().lookup_isbn(isbn).await?;
    print_json(&lookup)?;

    if add {
        let book = NewPhysicalBook::from_lookup(isbn, &lookup);
        if book.titulo.trim().is_empty() {
            anyhow::bail!("The ISBN lookup returned no title; nothing was added");
        }
        let created = ctx.client().physical_books().create(&book).await?;
        println!("Añadido al catálogo con id {}", created.id);
    }
    Ok(())
}

/// Runs the store's full load and prints what each container holds.
pub async fn load(ctx: &Context, account: Option<&str>) -> Result<()> {
    let store = ctx.store()?;
    store.set_account(account);

    match store.load_all().await {
        RefreshOutcome::Applied => {
            println!("Libros digitales: {}", store.library().get().len());
            println!("Libros físicos:   {}", store.physical_books().get().len());
            println!("Notas:            {}", store.notes().get().len());
            Ok(())
        }
        RefreshOutcome::Skipped(e) => Err(e.into()),
    }
}
