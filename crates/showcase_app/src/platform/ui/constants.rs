pub const PROMPT: &str = "showcase> ";

/// Songs requested when `--count` is not given.
pub const DEFAULT_SONG_COUNT: u32 = 5;

pub const HELP: &[&str] = &[
    "Commands:",
    "  projects [filter]           list projects, optionally filtered",
    "  mode realtime|upload|capture",
    "  describe <image-path>       describe an image",
    "  capture                     grab a frame from the camera source and describe it",
    "  recapture                   discard the captured image and its results",
    "  details                     detailed description of the last described image",
    "  ask <question>              ask about the last described image",
    "  extract <file-path>         extract and format text from a file",
    "  song <name> [--count N]     songs similar to a song",
    "  mood <text> [--count N]     songs matching a description",
    "  search <query>              search the web and videos",
    "  dismiss [job-id]            hide the processing notice; the job keeps running",
    "  status                      show every slot",
    "  help",
    "  quit",
];
