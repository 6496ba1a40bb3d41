use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mandelview",
    author,
    version,
    about = "Interactive Mandelbrot explorer",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Vertex shader compiled for the full-screen quad.
    #[arg(long, value_name = "FILE", default_value = "shaders/shader.vert")]
    pub vertex_shader: PathBuf,

    /// Fragment shader that evaluates and colors the fractal.
    #[arg(long, value_name = "FILE", default_value = "shaders/shader.frag")]
    pub fragment_shader: PathBuf,

    /// Iteration budget per pixel before a point counts as inside the set.
    #[arg(
        long,
        value_name = "COUNT",
        value_parser = parse_max_iterations,
        default_value_t = renderer::DEFAULT_MAX_ITERATIONS
    )]
    pub max_iterations: i32,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_max_iterations(value: &str) -> Result<i32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("iteration count must not be empty".to_string());
    }

    let count: i32 = trimmed
        .parse()
        .map_err(|_| format!("invalid iteration count '{trimmed}'; expected a whole number"))?;
    if count < 1 {
        return Err(format!("iteration count must be at least 1, got {count}"));
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_shipped_shaders() {
        let cli = Cli::parse_from(["mandelview"]);
        assert_eq!(cli.vertex_shader, PathBuf::from("shaders/shader.vert"));
        assert_eq!(cli.fragment_shader, PathBuf::from("shaders/shader.frag"));
        assert_eq!(cli.max_iterations, renderer::DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "mandelview",
            "--vertex-shader",
            "custom/quad.vert",
            "--fragment-shader",
            "custom/julia.frag",
            "--max-iterations",
            "1200",
        ]);
        assert_eq!(cli.vertex_shader, PathBuf::from("custom/quad.vert"));
        assert_eq!(cli.fragment_shader, PathBuf::from("custom/julia.frag"));
        assert_eq!(cli.max_iterations, 1200);
    }

    #[test]
    fn parses_iteration_counts() {
        assert_eq!(parse_max_iterations("1").unwrap(), 1);
        assert_eq!(parse_max_iterations(" 500 ").unwrap(), 500);
        assert!(parse_max_iterations("0").is_err());
        assert!(parse_max_iterations("-3").is_err());
        assert!(parse_max_iterations("many").is_err());
        assert!(parse_max_iterations("").is_err());
    }
}
