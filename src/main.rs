use EquiSim::Examples::reaction_examples::reaction_examples;
use EquiSim::Utils::logger::init_logger;
use EquiSim::settings::EngineSettings;
use log::LevelFilter;

pub fn main() {
    let settings = EngineSettings::load_or_default("equisim_settings.json").unwrap_or_default();
    init_logger(settings.log_level_filter().unwrap_or(LevelFilter::Info), None);
    //
    let task: usize = 3;
    reaction_examples(task);
}
