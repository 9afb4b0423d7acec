use anyhow::Result;
use arca_core::note::NewNote;

use super::Context;

pub async fn list(ctx: &Context, user: Option<&str>) -> Result<()> {
    let notes = ctx.client().notes_for(user).list().await?;
    for note in &notes {
        let preview = note.previsualizacion.as_deref().unwrap_or("");
        println!("{:>5}  {}  {}", note.id, note.titulo, preview);
    }
    Ok(())
}

pub async fn create(
    ctx: &Context,
    title: String,
    content: String,
    keywords: Option<String>,
    user: Option<&str>,
) -> Result<()> {
    let mut note = NewNote::new(title, content);
    if let Some(keywords) = keywords {
        note = note.with_keywords(keywords);
    }
    let created = ctx.client().notes_for(user).create(&note).await?;
    println!("Nota creada con id {}", created.id);
    Ok(())
}

pub async fn delete(ctx: &Context, id: i64, user: Option<&str>) -> Result<()> {
    let message = ctx.client().notes_for(user).delete(id).await?;
    println!("{}", message.mensaje);
    Ok(())
}
