//! Turns loaded modules into runnable commands.

use crate::command::{CommandAction, CommandExecutionError, CommandName, CommandNode, Invocation};
use crate::module::domain::{
    ModuleDefinition, ModuleEntry, ModuleParameterSpec, ModuleParameterType,
};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, value_parser};
use minijinja::Environment;
use serde_json::{Map, Number, Value};

/// Builds one command node per entry; groups become nodes with children.
#[must_use]
pub fn module_commands(entries: &[ModuleEntry]) -> Vec<CommandNode> {
    entries.iter().map(module_command).collect()
}

fn module_command(entry: &ModuleEntry) -> CommandNode {
    match entry {
        ModuleEntry::Command(definition) => definition
            .parameters()
            .iter()
            .fold(
                CommandNode::new(CommandName::from(definition.name()))
                    .with_about(definition.description()),
                |node, parameter| node.with_arg(parameter_arg(parameter)),
            )
            .with_action(ModuleAction {
                definition: definition.clone(),
            }),
        ModuleEntry::Group { name, entries } => module_commands(entries)
            .into_iter()
            .fold(CommandNode::new(CommandName::from(name)), CommandNode::with_child),
    }
}

fn parameter_arg(parameter: &ModuleParameterSpec) -> Arg {
    let arg = Arg::new(parameter.name.clone()).long(parameter.name.clone());
    let mut typed = match parameter.parameter_type {
        ModuleParameterType::String => arg.value_name("VALUE").required(parameter.required),
        ModuleParameterType::Number => arg
            .value_name("NUMBER")
            .value_parser(value_parser!(i64))
            .required(parameter.required),
        ModuleParameterType::Boolean => arg.action(ArgAction::SetTrue),
        ModuleParameterType::Select => arg
            .value_name("OPTION")
            .value_parser(PossibleValuesParser::new(parameter.options.clone()))
            .required(parameter.required),
    };
    if let Some(description) = &parameter.description {
        typed = typed.help(description.clone());
    }
    typed
}

struct ModuleAction {
    definition: ModuleDefinition,
}

impl CommandAction for ModuleAction {
    fn run(&self, invocation: &mut Invocation<'_>) -> Result<(), CommandExecutionError> {
        let context = template_context(
            invocation.command_path(),
            self.definition.parameters(),
            invocation.matches(),
        )?;
        let environment = Environment::new();
        let rendered = environment
            .render_str(self.definition.template(), context)
            .map_err(|err| CommandExecutionError::Render(err.to_string()))?;
        writeln!(invocation.out(), "{rendered}")?;
        Ok(())
    }
}

fn template_context(
    command: &str,
    parameters: &[ModuleParameterSpec],
    matches: &ArgMatches,
) -> Result<Map<String, Value>, CommandExecutionError> {
    let mut context = Map::new();
    context.insert("command".to_owned(), Value::String(command.to_owned()));
    for parameter in parameters {
        if let Some(value) = parameter_value(parameter, matches)? {
            context.insert(parameter.name.clone(), value);
        }
    }
    Ok(context)
}

/// Returns the parsed value, or `None` for an omitted option so templates see
/// it as undefined.
fn parameter_value(
    parameter: &ModuleParameterSpec,
    matches: &ArgMatches,
) -> Result<Option<Value>, CommandExecutionError> {
    let id = parameter.name.as_str();
    let lookup_error = |err: clap::parser::MatchesError| CommandExecutionError::Argument {
        argument: id.to_owned(),
        reason: err.to_string(),
    };
    let value = match parameter.parameter_type {
        ModuleParameterType::String | ModuleParameterType::Select => matches
            .try_get_one::<String>(id)
            .map_err(lookup_error)?
            .map(|text| Value::String(text.clone())),
        ModuleParameterType::Number => matches
            .try_get_one::<i64>(id)
            .map_err(lookup_error)?
            .map(|number| Value::Number(Number::from(*number))),
        ModuleParameterType::Boolean => Some(Value::Bool(
            matches
                .try_get_one::<bool>(id)
                .map_err(lookup_error)?
                .copied()
                .unwrap_or(false),
        )),
    };
    Ok(value)
}
