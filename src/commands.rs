//! Reference command set
//!
//! The canned commands the demo page registers: help, ls, cat, pwd. All
//! output is a static HTML fragment; there is no filesystem behind any of
//! this. Host pages are free to build their own `Commands` table instead.

use crate::shell::Commands;

pub const PROMPT: &str = "user@ldgrp:~$";

/// Build the default command table.
pub fn default_commands() -> Commands {
    let mut commands = Commands::new();

    commands.register(
        "help",
        Box::new(|_| {
            Some(
                "<div><ul>\
                 <li><strong>help</strong> - display this help</li>\
                 <li><strong>ls</strong> - list directory contents</li>\
                 <li><strong>cat</strong> - displays the contents of a file</li>\
                 <li><strong>pwd</strong> - displays the name of the working directory</li>\
                 </ul></div>"
                    .to_string(),
            )
        }),
    );

    commands.register(
        "ls",
        Box::new(|_| Some("<p>helloworld.txt</p>".to_string())),
    );

    commands.register(
        "cat",
        Box::new(|args| match args.first() {
            None => Some("<br/>".to_string()),
            Some(&"helloworld.txt") => Some("<p>Hello World!</p>".to_string()),
            Some(name) => Some(format!("<p>cat: {}: No such file or directory</p>", name)),
        }),
    );

    commands.register(
        "pwd",
        Box::new(|_| Some("<p>/home/ldgrp</p>".to_string())),
    );

    commands
}
