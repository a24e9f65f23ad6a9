mod diagnose;
mod rules;
