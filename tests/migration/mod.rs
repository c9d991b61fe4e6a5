mod materialize;
mod selection;
mod status;
