//! Language preference commands.

use sts_core::Language;

use super::{CommandError, Context, emit};

pub async fn show(ctx: &Context) {
    let language = ctx.state().language().lock().await.current();
    emit(&render(language));
}

pub async fn toggle(ctx: &Context) {
    let language = ctx.state().language().lock().await.toggle();
    emit(&render(language));
}

pub async fn set(ctx: &Context, code: &str) -> Result<(), CommandError> {
    let language = Language::parse(code)
        .ok_or_else(|| CommandError::InvalidArgument(format!("unsupported language: {code}")))?;
    ctx.state().language().lock().await.set(language);
    emit(&render(language));
    Ok(())
}

fn render(language: Language) -> String {
    format!("{} ({})", language.code(), language.dir())
}
