mod logout;
mod shell_navigation;
