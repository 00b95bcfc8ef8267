use std::path::PathBuf;

pub const HELP: &str = "\
Comandos:
  <texto>                  processa o texto digitado
  :file <caminho>          processa o conteúdo de um arquivo
  :server <host> <porta>   configura o servidor
  :health                  verifica o status do servidor
  :help                    mostra esta ajuda
  :quit                    encerra (cancela o processamento em andamento)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    File(PathBuf),
    Server { host: String, port: u16 },
    Health,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one line of operator input. Empty lines yield `None`; any line not
/// starting with `:` is text to process, kept verbatim.
pub fn parse(line: &str) -> Option<Command> {
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Some(Command::Text(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest.trim(), ""),
    };

    let command = match name {
        "q" | "quit" => Command::Quit,
        "health" => Command::Health,
        "help" => Command::Help,
        "file" if args.is_empty() => Command::Invalid("uso: :file <caminho>".to_string()),
        "file" => Command::File(PathBuf::from(args)),
        "server" => parse_server(args),
        other => Command::Invalid(format!("comando desconhecido: :{other}")),
    };
    Some(command)
}

fn parse_server(args: &str) -> Command {
    let mut parts = args.split_whitespace();
    let (Some(host), Some(port), None) = (parts.next(), parts.next(), parts.next()) else {
        return Command::Invalid("uso: :server <host> <porta>".to_string());
    };
    match port.parse::<u16>() {
        Ok(port) => Command::Server {
            host: host.to_string(),
            port,
        },
        Err(_) => Command::Invalid(format!("porta inválida: {port}")),
    }
}
