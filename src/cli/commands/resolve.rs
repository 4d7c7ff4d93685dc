//! Resolve command implementation.
//!
//! The `scriptenv resolve` command prints the interpreter a script would
//! run under, building its environment if needed.

use crate::builder::VenvBuilder;
use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::interpreter::SystemDiscovery;
use crate::resolver::{Resolution, Resolver};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Resolver over the host's interpreters and the default builder.
pub fn system_resolver(ctx: &CommandContext) -> Resolver<SystemDiscovery, VenvBuilder> {
    Resolver::new(
        SystemDiscovery::detect(ctx.platform, &ctx.home),
        VenvBuilder::new(ctx.platform),
        ctx.platform,
        &ctx.cache_root,
        ctx.settings.cache_size,
    )
}

/// The resolve command implementation.
pub struct ResolveCommand {
    context: CommandContext,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(context: &CommandContext, args: ResolveArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = system_resolver(&self.context).resolve(&self.args.script, ui)?;
        ui.output(&render_resolution(&resolution, self.args.json)?);
        Ok(CommandResult::success())
    }
}

/// Text printed for a resolution: the interpreter path, or a JSON object.
pub fn render_resolution(resolution: &Resolution, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(resolution).map_err(anyhow::Error::from)?)
    } else {
        Ok(resolution.interpreter.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::resolver::ResolutionSource;
    use crate::settings::Settings;

    #[test]
    fn renders_plain_path() {
        let resolution = Resolution::new(
            "/home/ada/.scriptenv/venv_cache/env_01/bin/python",
            ResolutionSource::Built,
        );
        assert_eq!(
            render_resolution(&resolution, false).unwrap(),
            "/home/ada/.scriptenv/venv_cache/env_01/bin/python"
        );
    }

    #[test]
    fn renders_json() {
        let resolution = Resolution::new("/usr/bin/python3", ResolutionSource::Current);
        let text = render_resolution(&resolution, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["source"], "current");
        assert_eq!(value["interpreter"], "/usr/bin/python3");
    }

    #[test]
    fn system_resolver_uses_context_cache_root() {
        let ctx = CommandContext::new(Platform::Linux, "/home/ada", Settings::default());
        let resolver = system_resolver(&ctx);
        assert_eq!(resolver.cache_root(), ctx.cache_root.as_path());
    }
}
