use anyhow::Result;

use super::Context;

pub async fn status(ctx: &Context) -> Result<()> {
    let status = ctx.client().system().status().await?;
    println!("{} ({}) - {}", status.estado, status.version, status.mensaje);
    Ok(())
}

pub async fn diagnostics(ctx: &Context) -> Result<()> {
    let report = ctx.client().system().diagnostics().await?;
    for component in report.components() {
        let state = report.component_status(component).unwrap_or_default();
        println!("{:<16} {}", component, state);
    }
    Ok(())
}
