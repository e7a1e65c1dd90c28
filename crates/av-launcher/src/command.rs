//! Deterministic rendering of a [`LaunchConfig`] into a child-process
//! invocation: argument list plus the scoped device-visibility variable.

use av_types::LaunchConfig;

/// Environment variable restricting which accelerators the child may use.
pub const DEVICE_VISIBILITY_VAR: &str = "CUDA_VISIBLE_DEVICES";

/// Optimizer entry point, resolved relative to the working directory.
pub const OPTIMIZER_ENTRY_POINT: &str = "scripts/run_avatar_optimizer.py";

/// Interpreter used to run the entry point unless overridden.
pub const DEFAULT_INTERPRETER: &str = "python";

/// A fully rendered invocation, ready to spawn.
///
/// `env` is injected on top of the inherited parent environment for the
/// child's scope only; the parent environment is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Render `config` against the default interpreter and entry point.
    pub fn build(config: &LaunchConfig) -> Self {
        Self::with_program(DEFAULT_INTERPRETER, OPTIMIZER_ENTRY_POINT, config)
    }

    /// Render `config` against an explicit interpreter and entry point.
    ///
    /// Argument order is fixed: entry point, then one flag/value pair per
    /// scalar field, then the bare `--use_group` flag when grouping is on.
    /// Identical configs always render identical invocations.
    pub fn with_program(program: &str, entry_point: &str, config: &LaunchConfig) -> Self {
        let mut args = vec![entry_point.to_string()];
        for (flag, value) in [
            ("--dataset", config.dataset.clone()),
            ("--group_idx", config.group_idx.to_string()),
            ("--emb_model", config.emb_model.clone()),
            ("--agent_llm", config.agent_llm.clone()),
            ("--api_func_llm", config.api_func_llm.clone()),
        ] {
            args.push(flag.to_string());
            args.push(value);
        }
        if config.use_group {
            args.push("--use_group".to_string());
        }

        let env = vec![(
            DEVICE_VISIBILITY_VAR.to_string(),
            render_visible_devices(&config.visible_devices),
        )];

        Self {
            program: program.to_string(),
            args,
            env,
        }
    }
}

/// Comma-joined decimal rendering of a device list; empty slice renders
/// as the empty string, which hides every device from the child.
pub fn render_visible_devices(devices: &[u32]) -> String {
    devices
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_original_script_invocation() {
        let invocation = Invocation::build(&LaunchConfig::default());

        assert_eq!(invocation.program, "python");
        assert_eq!(
            invocation.args,
            vec![
                "scripts/run_avatar_optimizer.py",
                "--dataset",
                "prime",
                "--group_idx",
                "0",
                "--emb_model",
                "text-embedding-ada-002",
                "--agent_llm",
                "gemma-2-27b-it",
                "--api_func_llm",
                "gemma-2-27b-it",
                "--use_group",
            ]
        );
        assert_eq!(
            invocation.env,
            vec![("CUDA_VISIBLE_DEVICES".to_string(), "1,2".to_string())]
        );
    }

    #[test]
    fn use_group_false_drops_only_trailing_flag() {
        let grouped = Invocation::build(&LaunchConfig::default());
        let ungrouped = Invocation::build(&LaunchConfig::default().with_use_group(false));

        assert_eq!(ungrouped.args.len() + 1, grouped.args.len());
        assert_eq!(grouped.args[..grouped.args.len() - 1], ungrouped.args[..]);
        assert!(!ungrouped.args.contains(&"--use_group".to_string()));
        assert_eq!(ungrouped.env, grouped.env);
    }

    #[test]
    fn group_idx_zero_is_rendered_not_omitted() {
        let invocation = Invocation::build(&LaunchConfig::default().with_group_idx(0));
        let pos = invocation
            .args
            .iter()
            .position(|a| a == "--group_idx")
            .unwrap();
        assert_eq!(invocation.args[pos + 1], "0");
    }

    #[test]
    fn device_rendering() {
        assert_eq!(render_visible_devices(&[1, 2]), "1,2");
        assert_eq!(render_visible_devices(&[0]), "0");
        assert_eq!(render_visible_devices(&[3, 0, 7]), "3,0,7");
        assert_eq!(render_visible_devices(&[]), "");
    }

    #[test]
    fn empty_device_list_leaves_args_unchanged() {
        let base = Invocation::build(&LaunchConfig::default());
        let hidden = Invocation::build(&LaunchConfig::default().with_visible_devices(vec![]));

        assert_eq!(base.args, hidden.args);
        assert_eq!(hidden.env[0].1, "");
    }

    #[test]
    fn rendering_is_idempotent() {
        let config = LaunchConfig::new("amazon", 4).with_use_group(false);
        assert_eq!(Invocation::build(&config), Invocation::build(&config));
    }
}
